//! Test data factories for seeding the mock congress client.
//!
//! # Usage
//!
//! ```ignore
//! use common::factories::{house_role, BillFactory, MemberFactory, JAN_3_2019, JAN_3_2021};
//!
//! let client = MockCongressClient::new();
//! MemberFactory::new("P000197")
//!     .with_role(house_role("CA", 12, "Democrat", JAN_3_2019, JAN_3_2021))
//!     .insert(&client);
//! BillFactory::new("hr1-116").with_sponsor("P000197").insert(&client);
//! ```

mod bill;
mod member;

pub use bill::BillFactory;
pub use member::{house_role, senate_role, MemberFactory};

/// 2019-01-03 12:00 at UTC-5, first day of the 116th Congress.
pub const JAN_3_2019: i64 = 1_546_534_800_000;
/// 2021-01-03 12:00 at UTC-5, last day of the 116th Congress.
pub const JAN_3_2021: i64 = 1_609_693_200_000;
/// A moment inside the 116th Congress (2020-05-20).
pub const MID_116TH: i64 = 1_590_000_000_000;
