//! Cross-origin policy and hardening headers for card responses.
//!
//! Cards are plain images that other sites hot-link, so the defaults allow
//! cross-origin embedding while refusing to run anything inside the SVG.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{
        header::{
            InvalidHeaderValue, CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
        HeaderMap, HeaderName, HeaderValue, Method,
    },
    middleware::Next,
    response::Response,
    Extension,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{CorsConfig, SecurityHeadersConfig};

const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

/// Build the CORS layer for the card routes.
///
/// `"*"` allows any origin; an empty list blocks cross-origin requests.
#[must_use]
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = &config.allowed_origins;

    let allow_origin = match origins.as_slice() {
        [] => {
            tracing::info!("no CORS origins configured, cross-origin requests are blocked");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
        _ if origins.iter().any(|o| o == "*") => {
            tracing::warn!("CORS allows any origin");
            AllowOrigin::any()
        }
        _ => {
            let mut allowed = Vec::with_capacity(origins.len());
            for origin in origins {
                match HeaderValue::from_str(origin) {
                    Ok(value) => allowed.push(value),
                    Err(_) => tracing::warn!(%origin, "skipping unusable CORS origin"),
                }
            }
            tracing::info!(?origins, "CORS origins configured");
            AllowOrigin::list(allowed)
        }
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// Headers stamped onto every response, resolved once at startup.
#[derive(Debug, Clone)]
pub struct SecurityHeaders(Arc<HeaderMap>);

impl SecurityHeaders {
    /// Resolve the configured header values.
    ///
    /// # Errors
    /// Returns an error if a configured value is not a legal header value.
    pub fn from_config(config: &SecurityHeadersConfig) -> Result<Self, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        headers.insert(
            X_FRAME_OPTIONS,
            HeaderValue::from_str(&config.frame_options.to_uppercase())?,
        );
        headers.insert(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_str(&config.content_security_policy)?,
        );
        headers.insert(
            CROSS_ORIGIN_RESOURCE_POLICY,
            HeaderValue::from_str(&config.resource_policy)?,
        );
        if let Some(max_age) = config.hsts_max_age {
            headers.insert(
                STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_str(&format!("max-age={max_age}"))?,
            );
        }
        Ok(Self(Arc::new(headers)))
    }

    fn apply(&self, target: &mut HeaderMap) {
        for (name, value) in self.0.iter() {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// Middleware that copies the resolved [`SecurityHeaders`] onto each response.
///
/// Expects the headers as an `Extension` layered outside this middleware.
pub async fn security_headers_middleware(
    Extension(headers): Extension<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    headers.apply(response.headers_mut());
    response
}
