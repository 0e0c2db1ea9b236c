//! Pure display-field derivation: area codes, party labels, colors, title
//! sentences, dates and text wrapping.

use chrono::DateTime;

use crate::congress::{ActionRecord, Lang, RoleRecord};

use super::error::DerivationError;

/// Fixed civic-data display offset (UTC-5), independent of the host timezone.
const DISPLAY_OFFSET_MS: i64 = -5 * 60 * 60 * 1000;

/// Maximum characters per wrapped last-bill line.
pub const LINE_WIDTH: usize = 74;
/// Number of wrapped last-bill lines on a member card.
pub const MAX_LINES: usize = 3;

const ELLIPSIS: &str = " ...";

pub const REPUBLICAN_COLOR: &str = "#e73a48";
pub const DEMOCRAT_COLOR: &str = "#4b8fea";
pub const NEUTRAL_COLOR: &str = "#4a4a4a";

/// The district of a role, treating `0` as at-large.
#[must_use]
pub fn district(role: &RoleRecord) -> Option<u32> {
    role.district.filter(|d| *d != 0)
}

/// `"CA-12"` for a House district, `"CA"` otherwise.
#[must_use]
pub fn area_code(role: &RoleRecord) -> String {
    match district(role) {
        Some(d) => format!("{}-{d}", role.state),
        None => role.state.clone(),
    }
}

/// Party name, translated for Chinese when a translation exists.
#[must_use]
pub fn party_label(party: Option<&str>, lang: Lang) -> String {
    let party = party.unwrap_or_default();
    match (lang, party) {
        (Lang::Zh, "Republican") => "共和黨".to_string(),
        (Lang::Zh, "Democrat") => "民主黨".to_string(),
        _ => party.to_string(),
    }
}

#[must_use]
pub fn avatar_color(party: Option<&str>) -> &'static str {
    match party {
        Some("Republican") => REPUBLICAN_COLOR,
        Some("Democrat") => DEMOCRAT_COLOR,
        _ => NEUTRAL_COLOR,
    }
}

/// `"{n}th"` for every number, matching the wording the cards have always used.
#[must_use]
pub fn nth(n: u32) -> String {
    format!("{n}th")
}

/// One-sentence description of an office, e.g.
/// "Representative for California's 12th congressional district" or "加州第12區眾議員".
#[must_use]
pub fn title_sentence(title_long: &str, state_name: &str, district: Option<u32>, lang: Lang) -> String {
    match (lang, district) {
        (Lang::Zh, Some(d)) => format!("{state_name}第{d}區{title_long}"),
        (Lang::Zh, None) => format!("{state_name}{title_long}"),
        (Lang::En, Some(d)) => format!(
            "{title_long} for {state_name}'s {} congressional district",
            nth(d)
        ),
        (Lang::En, None) => format!("{title_long} for {state_name}"),
    }
}

#[must_use]
pub fn congress_display(congress: u32, lang: Lang) -> String {
    match lang {
        Lang::En => nth(congress),
        Lang::Zh => format!("{congress}屆"),
    }
}

/// `MM/DD/YYYY` at UTC-5.
///
/// # Errors
///
/// Returns [`DerivationError::InvalidTimestamp`] if `epoch_ms` is outside
/// the representable date range.
pub fn format_date(epoch_ms: i64) -> Result<String, DerivationError> {
    epoch_ms
        .checked_add(DISPLAY_OFFSET_MS)
        .and_then(DateTime::from_timestamp_millis)
        .map(|shifted| shifted.format("%m/%d/%Y").to_string())
        .ok_or(DerivationError::InvalidTimestamp(epoch_ms))
}

/// Name parts joined by single spaces, skipping absent or blank parts.
#[must_use]
pub fn member_name(first: Option<&str>, middle: Option<&str>, last: Option<&str>) -> String {
    [first, middle, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap `text` into [`MAX_LINES`] lines of at most [`LINE_WIDTH`] characters.
///
/// Text that needs more lines is cut after the third, whose last four
/// characters become `" ..."`.
#[must_use]
pub fn multi_lines(text: &str) -> [String; MAX_LINES] {
    let chars: Vec<char> = text.chars().collect();
    let chunks: Vec<String> = chars
        .chunks(LINE_WIDTH)
        .map(|chunk| chunk.iter().collect())
        .collect();

    let mut lines: [String; MAX_LINES] = Default::default();
    for (line, chunk) in lines.iter_mut().zip(chunks.iter()) {
        line.clone_from(chunk);
    }

    if chunks.len() > MAX_LINES {
        let last = &mut lines[MAX_LINES - 1];
        let keep = last.chars().count().saturating_sub(ELLIPSIS.len());
        *last = last.chars().take(keep).collect::<String>() + ELLIPSIS;
    }
    lines
}

/// Party-line vote share with two significant digits, e.g. `"96%"`, `"5.2%"`.
/// Anything that would round to 100 renders as `"100%"`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn vote_percent(pct: f64) -> String {
    if pct >= 99.5 {
        return "100%".to_string();
    }
    if pct == 0.0 {
        return "0.0%".to_string();
    }

    let magnitude = pct.abs().log10().floor() as i32;
    let mut decimals = (1 - magnitude).max(0) as usize;
    let scale = 10f64.powi(decimals as i32);
    if decimals > 0 && (pct.abs() * scale).round() / scale >= 10f64.powi(magnitude + 1) {
        decimals -= 1;
    }
    format!("{pct:.decimals$}%")
}

/// The action with the greatest timestamp. The first one wins a tie.
#[must_use]
pub fn latest_action(actions: &[ActionRecord]) -> Option<&ActionRecord> {
    actions.iter().reduce(|best, candidate| {
        if candidate.datetime > best.datetime {
            candidate
        } else {
            best
        }
    })
}

/// Action description up to its first sentence break.
#[must_use]
pub fn action_headline(description: &str) -> &str {
    description.split('.').next().unwrap_or_default()
}
