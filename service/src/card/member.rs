//! Member card: fetch, derive and fill the member template.

use cc_render::{PillInput, TemplateValues};

use crate::congress::{fetch_record, BioDetail, CongressApiClient, Lang, MemberRecord};

use super::assets::CardAssets;
use super::display::{
    area_code, avatar_color, district, member_name, multi_lines, party_label, title_sentence,
    vote_percent,
};
use super::error::{CardError, DerivationError};
use super::last_action::{resolve_last_action, LastAction};
use super::picture::profile_picture;
use super::roles::{current_role, latest_role, resolve_roles};
use super::states::StateTable;

/// Fields requested for the member record.
pub const MEMBER_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "middleName",
    "profilePictures",
    "bioGuideId",
    "congressRoles",
    "cosponsoredBillIds",
    "sponsoredBillIds",
    "cosponsoredBills#date",
];

/// Display fields derived from the member record alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDisplay {
    pub name: String,
    pub title: String,
    pub area_code: String,
    pub party: String,
    pub avatar_color: &'static str,
    pub in_office: bool,
}

/// Term count and party-line vote share from the bio service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStats {
    pub terms: usize,
    pub party_vote: String,
}

/// Everything the member template needs apart from the pill markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCard {
    pub display: MemberDisplay,
    pub stats: MemberStats,
    pub picture: String,
    pub last_action: LastAction,
    pub sponsored_count: usize,
    pub cosponsored_count: usize,
}

/// Derive name, title, area, party, color and in-office status from the latest role.
///
/// # Errors
///
/// [`DerivationError::NoRoles`] when the member has no roles, or
/// [`DerivationError::UnknownState`] when the latest role's state is not in `states`.
pub fn derive_member_display(
    record: &MemberRecord,
    states: &StateTable,
    lang: Lang,
    now_ms: i64,
) -> Result<MemberDisplay, DerivationError> {
    let roles = resolve_roles(&record.congress_roles, lang);
    let latest = latest_role(&roles).ok_or_else(|| DerivationError::NoRoles {
        id: record.id.clone(),
    })?;
    let state_name = states.name(&latest.role.state, lang)?;
    let party = latest.role.party.as_deref();

    Ok(MemberDisplay {
        name: member_name(
            record.first_name.as_deref(),
            record.middle_name.as_deref(),
            record.last_name.as_deref(),
        ),
        title: title_sentence(latest.title_long, state_name, district(&latest.role), lang),
        area_code: area_code(&latest.role),
        party: party_label(party, lang),
        avatar_color: avatar_color(party),
        in_office: current_role(&roles, now_ms).is_some(),
    })
}

/// Terms served and the vote share of the most recent congress.
///
/// # Errors
///
/// [`DerivationError::NoBioRoles`] when the detail lists no congress, or
/// [`DerivationError::MissingField`] when the latest has no vote share.
pub fn member_stats(detail: &BioDetail, bio_id: &str) -> Result<MemberStats, DerivationError> {
    let latest = detail
        .roles
        .first()
        .ok_or_else(|| DerivationError::NoBioRoles(bio_id.to_string()))?;
    let pct = latest
        .votes_with_party_pct
        .ok_or_else(|| DerivationError::MissingField {
            id: bio_id.to_string(),
            field: "votes_with_party_pct",
        })?;

    Ok(MemberStats {
        terms: detail.roles.len(),
        party_vote: vote_percent(pct),
    })
}

/// Fetch a member and everything its card shows.
///
/// The picture, last action and bio detail are fetched concurrently once the
/// member record is in hand.
///
/// # Errors
///
/// Any failed record or bio fetch, or a [`DerivationError`]. A failed
/// picture download is not an error.
pub async fn load_member_card(
    client: &dyn CongressApiClient,
    assets: &CardAssets,
    id: &str,
    lang: Lang,
    now_ms: i64,
) -> Result<MemberCard, CardError> {
    let record: MemberRecord = fetch_record(client, id, MEMBER_FIELDS, lang).await?;
    let display = derive_member_display(&record, &assets.states, lang, now_ms)?;
    let bio_id = record
        .bio_guide_id
        .as_deref()
        .ok_or_else(|| DerivationError::MissingField {
            id: record.id.clone(),
            field: "bioGuideId",
        })?;

    let (picture, last_action, bio) = futures::try_join!(
        async {
            Ok::<_, CardError>(
                profile_picture(client, record.profile_pictures.as_ref(), &assets.default_avatar)
                    .await,
            )
        },
        resolve_last_action(
            client,
            &record.sponsored_bill_ids,
            &record.cosponsored_bill_dates,
            lang
        ),
        async { client.fetch_bio_detail(bio_id).await.map_err(CardError::from) },
    )?;
    let stats = member_stats(&bio, bio_id)?;

    Ok(MemberCard {
        display,
        stats,
        picture,
        last_action,
        sponsored_count: record.sponsored_bill_ids.len(),
        cosponsored_count: record.cosponsored_bill_ids.len(),
    })
}

const fn in_office_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "In Office",
        Lang::Zh => "現任議員",
    }
}

impl MemberCard {
    /// Area, party and (when in office) the in-office badge.
    #[must_use]
    pub fn pills(&self, lang: Lang) -> Vec<(&'static str, PillInput)> {
        vec![
            ("pill-area", PillInput::labeled(&self.display.area_code)),
            ("pill-party", PillInput::labeled(&self.display.party)),
            (
                "pill-in-congress",
                PillInput::flag(self.display.in_office, in_office_label(lang)),
            ),
        ]
    }

    #[must_use]
    pub fn template_values(&self, pills: String, assets: &CardAssets) -> TemplateValues {
        let [line1, line2, line3] = multi_lines(&self.last_action.summary);
        TemplateValues::new()
            .markup("PILLS", pills)
            .markup("PROFILE_PIC_BASE64", &self.picture)
            .markup("FB_PIC_BASE64", &assets.fb_icon)
            .markup("IG_PIC_BASE64", &assets.ig_icon)
            .markup("LINE_PIC_BASE64", &assets.line_icon)
            .text("AVATAR_COLOR", self.display.avatar_color)
            .text("MEMBER_NAME", &self.display.name)
            .text("MEMBER_TITLE", &self.display.title)
            .text("SPONSOR_NUM", self.sponsored_count.to_string())
            .text("COSPONSOR_NUM", self.cosponsored_count.to_string())
            .text("TERMS", self.stats.terms.to_string())
            .text("PARTY_VOTE", &self.stats.party_vote)
            .text("LAST_ACTION_TIME", &self.last_action.time)
            .text("LAST_BILL_L1", line1)
            .text("LAST_BILL_L2", line2)
            .text("LAST_BILL_L3", line3)
    }
}
