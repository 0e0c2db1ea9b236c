//! Error taxonomy of the card pipeline.

use cc_render::{MeasureError, RasterError};
use thiserror::Error;

use crate::congress::UpstreamError;

/// A record was missing data the card needs, or carried data it cannot display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("record {id} is missing field {field}")]
    MissingField { id: String, field: &'static str },

    #[error("record {id} has no congress roles")]
    NoRoles { id: String },

    #[error("no role of {id} is active at {timestamp}")]
    NoActiveRole { id: String, timestamp: i64 },

    #[error("unknown state code {0:?}")]
    UnknownState(String),

    #[error("unknown bill type {0:?}")]
    UnknownBillType(String),

    #[error("bill {0} has no sponsor")]
    NoSponsor(String),

    #[error("bill {0} has no actions")]
    NoActions(String),

    #[error("bio detail for {0} has no roles")]
    NoBioRoles(String),

    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

/// Laying out the card failed.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("pill layout failed: {0}")]
    Measure(#[from] MeasureError),
}

/// Pipeline stage that raised a [`CardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Deriving,
    Composing,
}

/// Any failure that degrades a request to the blank template.
#[derive(Debug, Error)]
pub enum CardError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl CardError {
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Upstream(_) => Stage::Fetching,
            Self::Derivation(_) => Stage::Deriving,
            Self::Compose(_) => Stage::Composing,
        }
    }
}

impl From<MeasureError> for CardError {
    fn from(err: MeasureError) -> Self {
        Self::Compose(ComposeError::Measure(err))
    }
}

/// PNG conversion failed. Never replaced by the fallback template.
#[derive(Debug, Error)]
#[error("PNG conversion failed: {0}")]
pub struct ConversionError(#[from] pub RasterError);
