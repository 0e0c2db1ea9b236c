//! Card routes.
//!
//! `GET /member/{id}` and `GET /bill/{id}` render a card when `id` ends in
//! `.svg` or `.png` and echo `id` as plain text otherwise.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::card::{CardRequest, CardService, EntityKind};
use crate::congress::Lang;
use crate::rest::ProblemDetails;

/// Query parameters of the card routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CardQuery {
    /// `en` for English; anything else renders Traditional Chinese
    pub lang: Option<String>,
}

/// Liveness text
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain"))
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn index() -> &'static str {
    "Webpage OK!"
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is healthy"))
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Member card
///
/// Renders the card of a member of Congress. Fetch or derivation failures
/// still answer 200 with the blank card.
#[utoipa::path(
    get,
    path = "/member/{id}",
    tag = "Cards",
    params(
        ("id" = String, Path, description = "Member id with a .svg or .png suffix"),
        CardQuery
    ),
    responses(
        (status = 200, description = "Card image (image/svg+xml or image/png), or the id as text/plain without a suffix", body = String, content_type = "image/svg+xml"),
        (status = 500, description = "PNG conversion failed", body = ProblemDetails)
    )
)]
pub async fn member_card(
    Extension(service): Extension<Arc<CardService>>,
    Path(id): Path<String>,
    Query(query): Query<CardQuery>,
) -> Response {
    card_response(&service, EntityKind::Member, &id, &query).await
}

/// Bill card
///
/// Renders the card of a bill. Fetch or derivation failures still answer
/// 200 with the blank card.
#[utoipa::path(
    get,
    path = "/bill/{id}",
    tag = "Cards",
    params(
        ("id" = String, Path, description = "Bill id with a .svg or .png suffix"),
        CardQuery
    ),
    responses(
        (status = 200, description = "Card image (image/svg+xml or image/png), or the id as text/plain without a suffix", body = String, content_type = "image/svg+xml"),
        (status = 500, description = "PNG conversion failed", body = ProblemDetails)
    )
)]
pub async fn bill_card(
    Extension(service): Extension<Arc<CardService>>,
    Path(id): Path<String>,
    Query(query): Query<CardQuery>,
) -> Response {
    card_response(&service, EntityKind::Bill, &id, &query).await
}

async fn card_response(
    service: &CardService,
    kind: EntityKind,
    raw_id: &str,
    query: &CardQuery,
) -> Response {
    let lang = Lang::from_query(query.lang.as_deref());
    let (id, format) = match CardRequest::parse(raw_id) {
        CardRequest::Echo(id) => return id.into_response(),
        CardRequest::Render { id, format } => (id, format),
    };

    match service.render_card(kind, &id, lang, format).await {
        Ok(card) => ([(CONTENT_TYPE, card.content_type)], card.bytes).into_response(),
        Err(e) => {
            tracing::error!(kind = kind.as_str(), %id, error = %e, "card conversion failed");
            ProblemDetails::conversion_failed(
                &e.to_string(),
                Some(format!("/{}/{raw_id}", kind.as_str())),
            )
            .into_response()
        }
    }
}

/// Card and system routes. Expects an `Extension<Arc<CardService>>` layer.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/member/{id}", get(member_card))
        .route("/bill/{id}", get(bill_card))
}
