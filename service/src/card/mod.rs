//! Card derivation pipeline.
//!
//! Turns a member or bill id into a rendered card:
//!
//! - [`roles`] - localized titles, latest/current/active-at role lookup
//! - [`display`] - area codes, party labels, colors, dates, text wrapping
//! - [`last_action`] - most recent sponsorship or cosponsorship of a member
//! - [`member`] / [`bill`] - per-kind fetch and derivation
//! - [`pipeline`] - [`CardService`], the fetch → derive → compose → convert
//!   orchestration with blank-template fallback

pub mod assets;
pub mod bill;
pub mod bill_types;
pub mod display;
pub mod error;
pub mod last_action;
pub mod member;
pub mod picture;
pub mod pipeline;
pub mod roles;
pub mod states;

pub use assets::{AssetError, CardAssets};
pub use error::{CardError, ComposeError, ConversionError, DerivationError, Stage};
pub use pipeline::{CardRequest, CardService, EntityKind, ImageFormat, RenderedCard};
pub use states::StateTable;
