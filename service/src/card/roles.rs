//! Office-term resolution: localized titles plus latest, current and
//! historically active role lookup.

use crate::congress::{Chamber, Lang, RoleRecord};

use super::error::DerivationError;

/// Territories whose House members are non-voting delegates.
const DELEGATE_STATES: &[&str] = &["MP", "GU", "AS", "VI", "PI", "DK", "DC"];

/// A role with its locale-dependent display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub role: RoleRecord,
    /// Short title ("Rep.", "Sen.")
    pub title: &'static str,
    /// Full title ("Representative", "Resident Commissioner")
    pub title_long: &'static str,
    pub role_type_display: &'static str,
    /// Upper-chamber class ("Class 2", "第2組")
    pub senator_class_display: Option<String>,
}

/// Annotate a single role for `lang`.
#[must_use]
pub fn resolve_role(role: &RoleRecord, lang: Lang) -> ResolvedRole {
    let zh = lang == Lang::Zh;
    let pick = |en: &'static str, zh_text: &'static str| if zh { zh_text } else { en };

    let (title, title_long, role_type_display, senator_class_display) = match role.chamber {
        Chamber::House => {
            let (title, title_long) = if role.state == "PR" {
                (pick("Commish.", "居民代表"), pick("Resident Commissioner", "居民代表"))
            } else if DELEGATE_STATES.contains(&role.state.as_str()) {
                (pick("Rep.", "國會代表"), pick("Delegate", "委任代表"))
            } else {
                (pick("Rep.", "眾議員"), pick("Representative", "眾議員"))
            };
            (title, title_long, pick("Representative", "眾議員"), None)
        }
        Chamber::Senate => {
            let class = role
                .senator_class
                .map(|n| if zh { format!("第{n}組") } else { format!("Class {n}") });
            (
                pick("Sen.", "參議員"),
                pick("Senator", "參議員"),
                pick("Senator", "參議員"),
                class,
            )
        }
    };

    ResolvedRole {
        role: role.clone(),
        title,
        title_long,
        role_type_display,
        senator_class_display,
    }
}

/// Annotate every role for `lang`, keeping the fetched order.
#[must_use]
pub fn resolve_roles(roles: &[RoleRecord], lang: Lang) -> Vec<ResolvedRole> {
    roles.iter().map(|role| resolve_role(role, lang)).collect()
}

/// The role with the greatest end date. The first one wins a tie.
#[must_use]
pub fn latest_role(roles: &[ResolvedRole]) -> Option<&ResolvedRole> {
    roles.iter().reduce(|best, candidate| {
        if candidate.role.end_date > best.role.end_date {
            candidate
        } else {
            best
        }
    })
}

/// The latest role, if it has not ended before `now_ms`.
#[must_use]
pub fn current_role(roles: &[ResolvedRole], now_ms: i64) -> Option<&ResolvedRole> {
    latest_role(roles).filter(|latest| latest.role.end_date >= now_ms)
}

/// The role whose `[start_date, end_date)` contains `timestamp`.
///
/// # Errors
///
/// Returns [`DerivationError::NoActiveRole`] when no role covers `timestamp`.
pub fn role_active_at<'a>(
    roles: &'a [ResolvedRole],
    timestamp: i64,
    member_id: &str,
) -> Result<&'a ResolvedRole, DerivationError> {
    roles
        .iter()
        .find(|r| r.role.start_date <= timestamp && timestamp < r.role.end_date)
        .ok_or_else(|| DerivationError::NoActiveRole {
            id: member_id.to_string(),
            timestamp,
        })
}
