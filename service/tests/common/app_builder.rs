//! Router factory for integration tests.
//!
//! [`TestAppBuilder`] assembles the same layers as `main.rs` around a
//! [`CardService`] whose collaborators are in-memory: canned upstream records,
//! a measurer that gives every character [`CHAR_WIDTH`] pixels, and a
//! rasterizer that wraps the SVG instead of drawing it.
//!
//! ```ignore
//! let builder = TestAppBuilder::with_mocks();
//! MemberFactory::new("P000197").insert(builder.client());
//! let response = builder.build().oneshot(request).await?;
//! ```

use std::sync::Arc;

use axum::{middleware, Extension, Router};
use cc_render::{
    mock::{EchoRasterizer, FixedWidthMeasurer},
    FontSpec, Rasterizer, Template, TextMeasurer,
};
use congresscard_api::{
    card::{assets::data_uri, CardAssets, CardService, StateTable},
    config::{CorsConfig, SecurityHeadersConfig},
    congress::{mock::MockCongressClient, CongressApiClient},
    http::{self, build_cors_layer, security_headers_middleware, SecurityHeaders},
};

/// Pixel width the default measurer assigns to each character.
pub const CHAR_WIDTH: f32 = 10.0;

/// The assets shipped in `service/assets`, embedded at compile time.
#[allow(clippy::expect_used)]
pub fn bundled_assets() -> CardAssets {
    CardAssets {
        member_template: Template::new(include_str!("../../assets/member-card-template.svg")),
        bill_template: Template::new(include_str!("../../assets/bill-card-template.svg")),
        default_avatar: data_uri(include_bytes!("../../assets/default-avatar.png")),
        fb_icon: data_uri(include_bytes!("../../assets/icon-fb.png")),
        ig_icon: data_uri(include_bytes!("../../assets/icon-ig.png")),
        line_icon: data_uri(include_bytes!("../../assets/icon-line.png")),
        states: StateTable::from_json(include_str!("../../assets/states.json"))
            .expect("bundled state table parses"),
    }
}

/// Card router with swappable collaborators and optional outer layers.
pub struct TestAppBuilder {
    /// Record, bio and picture store shared with the test
    client: Arc<MockCongressClient>,
    measurer: Arc<dyn TextMeasurer>,
    rasterizer: Arc<dyn Rasterizer>,
    /// `None` skips the CORS layer entirely
    cors_origins: Option<Vec<String>>,
    security_headers: Option<SecurityHeadersConfig>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Card routes over an empty mock client, without CORS or security headers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Arc::new(MockCongressClient::new()),
            measurer: Arc::new(FixedWidthMeasurer::new(CHAR_WIDTH)),
            rasterizer: Arc::new(EchoRasterizer),
            cors_origins: None,
            security_headers: None,
        }
    }

    /// Full app mirroring production: CORS for the local frontend and the
    /// default security headers.
    #[must_use]
    pub fn with_mocks() -> Self {
        Self::new()
            .with_cors(&["http://localhost:3000"])
            .with_security_headers_default()
    }

    /// The mock client the app will read from; seed it before `build`.
    #[must_use]
    pub fn client(&self) -> &MockCongressClient {
        &self.client
    }

    #[must_use]
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    /// Same semantics as `cors.allowed_origins`: empty blocks, `"*"` allows all.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().copied().map(String::from).collect());
        self
    }

    #[must_use]
    pub fn with_security_headers_default(mut self) -> Self {
        self.security_headers = Some(SecurityHeadersConfig::default());
        self
    }

    #[must_use]
    pub fn with_security_headers(mut self, config: SecurityHeadersConfig) -> Self {
        self.security_headers = Some(config);
        self
    }

    /// The card service the router will use.
    #[must_use]
    pub fn service(&self) -> CardService {
        CardService::new(
            Arc::clone(&self.client) as Arc<dyn CongressApiClient>,
            Arc::clone(&self.measurer),
            Arc::clone(&self.rasterizer),
            Arc::new(bundled_assets()),
            FontSpec::default(),
        )
    }

    /// Layers innermost first, as in `main.rs`: service extension, CORS,
    /// then the security headers.
    #[must_use]
    pub fn build(self) -> Router {
        let service = Arc::new(self.service());
        let mut app = http::router().layer(Extension(service));

        if let Some(origins) = self.cors_origins {
            app = app.layer(build_cors_layer(&CorsConfig {
                allowed_origins: origins,
            }));
        }

        if let Some(config) = self.security_headers {
            if config.enabled {
                let headers =
                    SecurityHeaders::from_config(&config).expect("valid security headers");
                app = app
                    .layer(middleware::from_fn(security_headers_middleware))
                    .layer(Extension(headers));
            }
        }

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_builder_serves_health_route() {
        let app = TestAppBuilder::new().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[test]
    fn test_bundled_assets_include_territories() {
        let assets = bundled_assets();
        assert!(assets.states.len() > 50);
        assert!(assets.default_avatar.starts_with("data:image/png;base64,"));
    }
}
