//! Bill record factory.

use congresscard_api::congress::mock::MockCongressClient;
use serde_json::{json, Value};

use super::JAN_3_2019;

/// Builder for bill records. Defaults to H.R. 1 of the 116th Congress,
/// introduced on [`JAN_3_2019`] with one action that day.
pub struct BillFactory {
    id: String,
    title: String,
    congress: u32,
    bill_type: String,
    bill_number: String,
    introduced: i64,
    sponsors: Vec<String>,
    cosponsors: Vec<String>,
    actions: Vec<Value>,
}

impl BillFactory {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "For the People Act of 2019".to_string(),
            congress: 116,
            bill_type: "hr".to_string(),
            bill_number: "1".to_string(),
            introduced: JAN_3_2019,
            sponsors: Vec::new(),
            cosponsors: Vec::new(),
            actions: vec![json!({
                "description": "Referred to the Committee on House Administration. Also referred to others.",
                "datetime": JAN_3_2019
            })],
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    #[must_use]
    pub fn with_code(mut self, bill_type: &str, number: &str) -> Self {
        self.bill_type = bill_type.to_string();
        self.bill_number = number.to_string();
        self
    }

    #[must_use]
    pub fn introduced_on(mut self, date: i64) -> Self {
        self.introduced = date;
        self
    }

    #[must_use]
    pub fn with_sponsor(mut self, member_id: &str) -> Self {
        self.sponsors.push(member_id.to_string());
        self
    }

    #[must_use]
    pub fn with_cosponsors(mut self, count: usize) -> Self {
        self.cosponsors = (0..count).map(|i| format!("C{i:06}")).collect();
        self
    }

    #[must_use]
    pub fn with_action(mut self, description: &str, datetime: i64) -> Self {
        self.actions.push(json!({ "description": description, "datetime": datetime }));
        self
    }

    /// Store the record in `client`; returns the bill id.
    pub fn insert(self, client: &MockCongressClient) -> String {
        client.insert_record(json!({
            "_id": self.id,
            "title": self.title,
            "congress": self.congress,
            "billType": self.bill_type,
            "billNumber": self.bill_number,
            "introducedDate": self.introduced,
            "sponsorIds": self.sponsors,
            "cosponsorIds": self.cosponsors,
            "actions": self.actions,
        }));
        self.id
    }
}
