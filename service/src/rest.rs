//! REST error bodies and `OpenAPI` documentation for the card routes.

#![allow(clippy::needless_for_each)]

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Serialize, Serializer};
use utoipa::{OpenApi, ToSchema};

use crate::http::cards;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_as_u16<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 body returned when a card request fails outright.
///
/// Only PNG conversion fails this way; every other pipeline failure still
/// answers 200 with the blank card.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    #[serde(serialize_with = "status_as_u16")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    pub detail: String,
    /// Request path that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Stable code for clients that branch on the failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    pub code: String,
}

impl ProblemDetails {
    /// A card could not be converted to PNG.
    #[must_use]
    pub fn conversion_failed(detail: &str, instance: Option<String>) -> Self {
        Self {
            problem_type: "/errors/conversion".to_string(),
            title: "Card Conversion Failed".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.to_string(),
            instance,
            extensions: Some(ProblemExtensions {
                code: "CONVERSION_ERROR".to_string(),
            }),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// `OpenAPI` documentation for the card API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CongressCard API",
        version = "1.0.0",
        description = "Shareable SVG/PNG cards for members of Congress and bills",
        license(name = "MIT")
    ),
    paths(cards::index, cards::health_check, cards::member_card, cards::bill_card),
    components(schemas(ProblemDetails, ProblemExtensions))
)]
pub struct ApiDoc;
