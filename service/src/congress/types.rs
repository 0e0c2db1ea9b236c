//! Data types for congress record and bio API responses.
//!
//! Records come back as sparse projections: only the requested fields are
//! present, so everything beyond `_id` is optional or defaulted. Numbers the
//! source sometimes serializes as strings (dates, districts, congress
//! numbers) are accepted in either form.

use serde::{Deserialize, Serialize};
use serde_aux::prelude::{
    deserialize_number_from_string, deserialize_option_number_from_string,
    deserialize_string_from_number,
};

/// Display language of a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    #[default]
    Zh,
}

impl Lang {
    /// `?lang=en` selects English; anything else selects Chinese.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("en") => Self::En,
            _ => Self::Zh,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

/// Legislative chamber of an office term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chamber {
    #[serde(rename = "h")]
    House,
    #[serde(rename = "s")]
    Senate,
}

/// One time-bounded office term. Dates are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub chamber: Chamber,
    /// State or territory code (e.g., "CA", "PR")
    pub state: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub district: Option<u32>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub start_date: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub end_date: i64,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub senator_class: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePictures {
    #[serde(rename = "200px", default)]
    pub px200: Option<String>,
}

/// A bill the member cosponsored, with the cosponsorship date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosponsoredBillDate {
    #[serde(rename = "_id")]
    pub bill_id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub date: i64,
}

/// Member fields needed for a member card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_pictures: Option<ProfilePictures>,
    #[serde(default)]
    pub bio_guide_id: Option<String>,
    #[serde(default)]
    pub congress_roles: Vec<RoleRecord>,
    #[serde(default)]
    pub sponsored_bill_ids: Vec<String>,
    #[serde(default)]
    pub cosponsored_bill_ids: Vec<String>,
    #[serde(rename = "cosponsoredBills#date", default)]
    pub cosponsored_bill_dates: Vec<CosponsoredBillDate>,
}

/// Sponsor fields needed on a bill card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub congress_roles: Vec<RoleRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub profile_pictures: Option<ProfilePictures>,
}

/// A recorded action on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub description: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub datetime: i64,
}

/// Bill fields needed for a bill card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub congress: u32,
    pub bill_type: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub bill_number: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub introduced_date: i64,
    #[serde(default)]
    pub sponsor_ids: Vec<String>,
    #[serde(default)]
    pub cosponsor_ids: Vec<String>,
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
}

/// Introduction date of a sponsored bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDateRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub introduced_date: i64,
}

/// Code and title of a bill, for last-action summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillHeadlineRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub bill_type: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub bill_number: String,
}

/// Response envelope of the bio detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioResponse {
    #[serde(default)]
    pub results: Vec<BioDetail>,
}

/// Legislator statistics from the bio service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioDetail {
    #[serde(default)]
    pub roles: Vec<BioRole>,
}

/// One congress served, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioRole {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub congress: u32,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub votes_with_party_pct: Option<f64>,
}
