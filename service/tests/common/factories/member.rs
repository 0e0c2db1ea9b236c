//! Member record factory.

use congresscard_api::congress::{mock::MockCongressClient, BioDetail, BioRole};
use serde_json::{json, Value};

/// A House term as the records service serializes it.
pub fn house_role(state: &str, district: u32, party: &str, start: i64, end: i64) -> Value {
    json!({
        "chamber": "h",
        "state": state,
        "district": district,
        "party": party,
        "startDate": start,
        "endDate": end
    })
}

/// A Senate term as the records service serializes it.
pub fn senate_role(state: &str, class: u8, party: &str, start: i64, end: i64) -> Value {
    json!({
        "chamber": "s",
        "state": state,
        "party": party,
        "senatorClass": class,
        "startDate": start,
        "endDate": end
    })
}

/// Builder for member records with sensible defaults.
///
/// Unless told otherwise, the member has a bio detail of two congresses
/// (95.53% and 90% party votes) and no bills.
pub struct MemberFactory {
    id: String,
    first_name: String,
    last_name: String,
    roles: Vec<Value>,
    picture_url: Option<String>,
    sponsored: Vec<String>,
    cosponsored: Vec<(String, i64)>,
    bio: Option<BioDetail>,
}

impl MemberFactory {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: "Nancy".to_string(),
            last_name: "Pelosi".to_string(),
            roles: Vec::new(),
            picture_url: None,
            sponsored: Vec::new(),
            cosponsored: Vec::new(),
            bio: Some(BioDetail {
                roles: vec![
                    BioRole {
                        congress: 116,
                        votes_with_party_pct: Some(95.53),
                    },
                    BioRole {
                        congress: 115,
                        votes_with_party_pct: Some(90.0),
                    },
                ],
            }),
        }
    }

    #[must_use]
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = first.to_string();
        self.last_name = last.to_string();
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Value) -> Self {
        self.roles.push(role);
        self
    }

    /// Point `profilePictures.200px` at `url`.
    #[must_use]
    pub fn with_picture(mut self, url: &str) -> Self {
        self.picture_url = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn with_sponsored(mut self, bill_ids: &[&str]) -> Self {
        self.sponsored = bill_ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    /// Add a cosponsorship of `bill_id` on `date`.
    #[must_use]
    pub fn with_cosponsored(mut self, bill_id: &str, date: i64) -> Self {
        self.cosponsored.push((bill_id.to_string(), date));
        self
    }

    /// Leave the bio service without an entry for this member.
    #[must_use]
    pub fn without_bio(mut self) -> Self {
        self.bio = None;
        self
    }

    /// The bio guide id the record carries.
    #[must_use]
    pub fn bio_guide_id(&self) -> String {
        format!("bio-{}", self.id)
    }

    /// Store the record (and bio detail) in `client`; returns the member id.
    pub fn insert(self, client: &MockCongressClient) -> String {
        let bio_id = self.bio_guide_id();
        let mut record = json!({
            "_id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "bioGuideId": bio_id,
            "congressRoles": self.roles,
            "sponsoredBillIds": self.sponsored,
            "cosponsoredBillIds": self.cosponsored.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            "cosponsoredBills#date": self
                .cosponsored
                .iter()
                .map(|(id, date)| json!({ "_id": id, "date": date }))
                .collect::<Vec<_>>(),
        });
        if let Some(url) = &self.picture_url {
            record["profilePictures"] = json!({ "200px": url });
        }
        client.insert_record(record);

        if let Some(bio) = self.bio {
            client.set_bio_detail(&bio_id, bio);
        }
        self.id
    }
}
