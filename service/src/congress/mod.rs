//! Upstream data for the cards.
//!
//! Two services feed the pipeline: a record service that serves sparse
//! projections of members and bills (`GET /v2?id=..&field=..`), and a bio
//! service that reports party-line voting statistics per legislator.
//! [`CongressApiClient`] hides both behind one trait; [`HttpCongressClient`]
//! talks to them with reqwest and `mock::MockCongressClient` (feature
//! `test-utils`) serves canned records for tests.
//!
//! Records come back as loose JSON. [`fetch_records`] and [`fetch_record`]
//! decode them into the typed views in `types`, turning shape mismatches into
//! [`UpstreamError::Decode`].

mod client;
mod types;

pub use client::{
    describe_request, fetch_record, fetch_records, CongressApiClient, HttpCongressClient,
    UpstreamError,
};
pub use types::{
    ActionRecord, BillDateRecord, BillHeadlineRecord, BillRecord, BioDetail, BioResponse, BioRole,
    Chamber, CosponsoredBillDate, Lang, MemberRecord, PictureRecord, ProfilePictures, RoleRecord,
    SponsorRecord,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
