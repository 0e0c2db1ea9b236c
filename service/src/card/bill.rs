//! Bill card: fetch the bill and its sponsor, derive, fill the bill template.

use cc_render::{PillInput, TemplateValues};

use crate::congress::{
    fetch_record, BillRecord, CongressApiClient, Lang, PictureRecord, SponsorRecord,
    UpstreamError,
};

use super::assets::CardAssets;
use super::bill_types::BillType;
use super::display::{
    action_headline, avatar_color, congress_display, district, format_date, latest_action,
    member_name, title_sentence,
};
use super::error::{CardError, DerivationError};
use super::picture::profile_picture;
use super::roles::{resolve_roles, role_active_at};
use super::states::StateTable;

/// Fields requested for the bill record.
pub const BILL_FIELDS: &[&str] = &[
    "title",
    "congress",
    "billType",
    "billNumber",
    "introducedDate",
    "sponsorIds",
    "cosponsorIds",
    "actions",
];

/// Fields requested for the bill's sponsor.
pub const SPONSOR_FIELDS: &[&str] = &["firstName", "lastName", "middleName", "congressRoles"];

/// Display fields derived from the bill record alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDisplay {
    pub title: String,
    pub congress: String,
    pub code: String,
    pub type_label: &'static str,
    pub introduced: String,
    pub latest_action: String,
    pub latest_action_time: String,
    pub cosponsor_count: usize,
}

/// Sponsor fields, taken from the role held when the bill was introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorDisplay {
    pub name: String,
    pub title: String,
    pub avatar_color: &'static str,
}

/// Everything the bill template needs apart from the pill markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillCard {
    pub bill: BillDisplay,
    pub sponsor: SponsorDisplay,
    pub picture: String,
}

/// Derive congress, code, type, dates and latest action of a bill.
///
/// # Errors
///
/// [`DerivationError::UnknownBillType`], [`DerivationError::NoActions`] or
/// [`DerivationError::InvalidTimestamp`].
pub fn derive_bill_display(bill: &BillRecord, lang: Lang) -> Result<BillDisplay, DerivationError> {
    let bill_type = BillType::lookup(&bill.bill_type)?;
    let action =
        latest_action(&bill.actions).ok_or_else(|| DerivationError::NoActions(bill.id.clone()))?;

    Ok(BillDisplay {
        title: bill.title.clone(),
        congress: congress_display(bill.congress, lang),
        code: bill_type.code_display(&bill.bill_number),
        type_label: bill_type.label(lang),
        introduced: format_date(bill.introduced_date)?,
        latest_action: action_headline(&action.description).to_string(),
        latest_action_time: format_date(action.datetime)?,
        cosponsor_count: bill.cosponsor_ids.len(),
    })
}

/// Derive the sponsor's name, title and color as of `introduced_date`.
///
/// # Errors
///
/// [`DerivationError::NoActiveRole`] when no sponsor role covers the date, or
/// [`DerivationError::UnknownState`].
pub fn derive_sponsor_display(
    sponsor: &SponsorRecord,
    introduced_date: i64,
    states: &StateTable,
    lang: Lang,
) -> Result<SponsorDisplay, DerivationError> {
    let roles = resolve_roles(&sponsor.congress_roles, lang);
    let role = role_active_at(&roles, introduced_date, &sponsor.id)?;
    let state_name = states.name(&role.role.state, lang)?;

    Ok(SponsorDisplay {
        name: member_name(
            sponsor.first_name.as_deref(),
            sponsor.middle_name.as_deref(),
            sponsor.last_name.as_deref(),
        ),
        title: title_sentence(role.title_long, state_name, district(&role.role), lang),
        avatar_color: avatar_color(role.role.party.as_deref()),
    })
}

/// Fetch a bill, its first sponsor and the sponsor's picture.
///
/// # Errors
///
/// Any failed record fetch, or a [`DerivationError`]. A failed picture
/// download is not an error.
pub async fn load_bill_card(
    client: &dyn CongressApiClient,
    assets: &CardAssets,
    id: &str,
    lang: Lang,
) -> Result<BillCard, CardError> {
    let bill: BillRecord = fetch_record(client, id, BILL_FIELDS, lang).await?;
    let display = derive_bill_display(&bill, lang)?;
    let sponsor_id = bill
        .sponsor_ids
        .first()
        .ok_or_else(|| DerivationError::NoSponsor(bill.id.clone()))?;

    let (sponsor, picture) = futures::try_join!(
        fetch_record::<SponsorRecord>(client, sponsor_id, SPONSOR_FIELDS, lang),
        async {
            let record: PictureRecord =
                fetch_record(client, sponsor_id, &["profilePictures"], lang).await?;
            let picture =
                profile_picture(client, record.profile_pictures.as_ref(), &assets.default_avatar)
                    .await;
            Ok::<_, UpstreamError>(picture)
        },
    )?;
    let sponsor = derive_sponsor_display(&sponsor, bill.introduced_date, &assets.states, lang)?;

    Ok(BillCard {
        bill: display,
        sponsor,
        picture,
    })
}

fn introduced_label(date: &str, lang: Lang) -> String {
    match lang {
        Lang::En => format!("Introduced {date}"),
        Lang::Zh => format!("{date} 提案"),
    }
}

impl BillCard {
    /// Congress, bill code, bill type and introduction date.
    #[must_use]
    pub fn pills(&self, lang: Lang) -> Vec<(&'static str, PillInput)> {
        vec![
            ("pill-congress", PillInput::labeled(&self.bill.congress)),
            ("pill-billCode", PillInput::labeled(&self.bill.code)),
            ("pill-billType", PillInput::labeled(self.bill.type_label)),
            (
                "pill-billIntroDate",
                PillInput::labeled(introduced_label(&self.bill.introduced, lang)),
            ),
        ]
    }

    #[must_use]
    pub fn template_values(&self, pills: String, assets: &CardAssets) -> TemplateValues {
        TemplateValues::new()
            .markup("PILLS", pills)
            .markup("PROFILE_PIC_BASE64", &self.picture)
            .markup("FB_PIC_BASE64", &assets.fb_icon)
            .markup("IG_PIC_BASE64", &assets.ig_icon)
            .markup("LINE_PIC_BASE64", &assets.line_icon)
            .text("BILL_CODE", &self.bill.code)
            .text("BILL_TITLE", &self.bill.title)
            .text("SPONSOR_NAME", &self.sponsor.name)
            .text("SPONSOR_TITLE", &self.sponsor.title)
            .text("COSPONSORS", self.bill.cosponsor_count.to_string())
            .text("LAST_ACTION", &self.bill.latest_action)
            .text("LAST_ACTION_TIME", &self.bill.latest_action_time)
            .text("AVATAR_COLOR", self.sponsor.avatar_color)
    }
}
