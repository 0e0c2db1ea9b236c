use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// Service configuration.
///
/// Layers, later wins: struct defaults, then `config.yaml` when present,
/// then `CC_`-prefixed environment variables with `__` between sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub security_headers: SecurityHeadersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Remote data sources consumed by the card pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL of the congress record service (required, no compiled-in default).
    #[serde(default)]
    pub records_base_url: String,

    /// Base URL of the legislator bio/statistics service.
    #[serde(default = "default_bio_base_url")]
    pub bio_base_url: String,

    /// API key sent as `X-API-Key` to the bio service (required).
    #[serde(default)]
    pub bio_api_key: String,

    /// Per-request timeout in milliseconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    /// Directory holding card templates, icons, the default avatar and the state table.
    #[serde(default = "default_assets_dir")]
    pub dir: String,

    /// Extra font files for text measurement and rasterization, loaded on top
    /// of the system fonts. Defaults to `{dir}/fonts`.
    #[serde(default)]
    pub fonts_dir: Option<String>,
}

impl AssetsConfig {
    #[must_use]
    pub fn font_dir_path(&self) -> PathBuf {
        self.fonts_dir
            .as_ref()
            .map_or_else(|| Path::new(&self.dir).join("fonts"), PathBuf::from)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Font family used for pill text.
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Pill font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Scale factor applied when rasterizing to PNG.
    #[serde(default = "default_png_scale")]
    pub png_scale: f32,

    /// Bound on a single text measurement in milliseconds. Unset means no bound.
    #[serde(default)]
    pub measure_timeout_ms: Option<u64>,
}

impl RenderConfig {
    #[must_use]
    pub fn measure_timeout(&self) -> Option<Duration> {
        self.measure_timeout_ms.map(Duration::from_millis)
    }
}

/// Origins allowed to fetch cards from a browser.
///
/// Accepts a YAML list or, for `CC_CORS__ALLOWED_ORIGINS`, a comma-separated
/// string. `"*"` opens the routes to every origin. Empty blocks them all.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default, deserialize_with = "deserialize_origins")]
    pub allowed_origins: Vec<String>,
}

fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

// serde takes defaults as function paths
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bio_base_url() -> String {
    "https://api.propublica.org/congress/v1".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_font_family() -> String {
    cc_render::DEFAULT_FONT_FAMILY.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_font_size() -> f32 {
    24.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_png_scale() -> f32 {
    1.0
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            fonts_dir: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            png_scale: default_png_scale(),
            measure_timeout_ms: None,
        }
    }
}

/// Hardening headers added to every response.
///
/// The defaults suit cards that other sites embed as `<img>`: any origin may
/// load them, nothing may frame them, and the SVG may not load scripts or
/// remote resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityHeadersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `X-Frame-Options`, `DENY` or `SAMEORIGIN`.
    #[serde(default = "default_frame_options")]
    pub frame_options: String,

    #[serde(default = "default_card_csp")]
    pub content_security_policy: String,

    /// `Cross-Origin-Resource-Policy`; `cross-origin` lets any page embed a card.
    #[serde(default = "default_resource_policy")]
    pub resource_policy: String,

    /// HSTS max-age in seconds. Unset sends no HSTS header.
    #[serde(default)]
    pub hsts_max_age: Option<u64>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

fn default_frame_options() -> String {
    "DENY".to_string()
}

// Rendered cards inline their images as data: URIs and style via attributes.
fn default_card_csp() -> String {
    "default-src 'none'; img-src data:; style-src 'unsafe-inline'".to_string()
}

fn default_resource_policy() -> String {
    "cross-origin".to_string()
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frame_options: default_frame_options(),
            content_security_policy: default_card_csp(),
            resource_policy: default_resource_policy(),
            hsts_max_age: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            upstream: UpstreamConfig {
                records_base_url: String::new(),
                bio_base_url: default_bio_base_url(),
                bio_api_key: String::new(),
                timeout_ms: None,
            },
            assets: AssetsConfig::default(),
            render: RenderConfig::default(),
            cors: CorsConfig::default(),
            security_headers: SecurityHeadersConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl Config {
    /// Load `config.yaml` from the working directory plus the environment.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load with an explicit YAML path. A missing file is not an error.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CC_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the values figment cannot: required upstream settings, URL
    /// schemes, positive render numbers and header vocabularies.
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        if self.upstream.records_base_url.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.records_base_url is required. Set CC_UPSTREAM__RECORDS_BASE_URL environment variable or configure in config.yaml.".into(),
            ));
        }

        for (name, url) in [
            ("upstream.records_base_url", &self.upstream.records_base_url),
            ("upstream.bio_base_url", &self.upstream.bio_base_url),
        ] {
            if !is_http_url(url) {
                return Err(ConfigError::Validation(format!(
                    "{name} must start with http:// or https://, got: '{url}'"
                )));
            }
        }

        if self.upstream.bio_api_key.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.bio_api_key is required. Set CC_UPSTREAM__BIO_API_KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        if self.upstream.timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "upstream.timeout_ms cannot be 0 (omit it for no timeout)".into(),
            ));
        }

        if self.render.font_size <= 0.0 || !self.render.font_size.is_finite() {
            return Err(ConfigError::Validation(
                "render.font_size must be a positive number".into(),
            ));
        }

        if self.render.png_scale <= 0.0 || !self.render.png_scale.is_finite() {
            return Err(ConfigError::Validation(
                "render.png_scale must be a positive number".into(),
            ));
        }

        if self.render.measure_timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "render.measure_timeout_ms cannot be 0 (omit it for no bound)".into(),
            ));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !is_http_url(origin) {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        let headers = &self.security_headers;
        if !["DENY", "SAMEORIGIN"].contains(&headers.frame_options.to_uppercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "security_headers.frame_options must be DENY or SAMEORIGIN, got: '{}'",
                headers.frame_options
            )));
        }

        if !["same-origin", "same-site", "cross-origin"].contains(&headers.resource_policy.as_str())
        {
            return Err(ConfigError::Validation(format!(
                "security_headers.resource_policy must be same-origin, same-site or cross-origin, got: '{}'",
                headers.resource_policy
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.upstream.records_base_url = "https://records.example.com".into();
        config.upstream.bio_api_key = "bio-key".into();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.assets.dir, "assets");
        assert!(config.render.font_family.ends_with(", sans-serif"));
        assert_eq!(config.assets.font_dir_path(), Path::new("assets/fonts"));
        assert!((config.render.font_size - 24.0).abs() < f32::EPSILON);
        assert!((config.render.png_scale - 1.0).abs() < f32::EPSILON);
        assert!(config.render.measure_timeout().is_none());
        assert!(config.upstream.timeout().is_none());
        assert!(config.upstream.records_base_url.is_empty());
        assert!(config.upstream.bio_api_key.is_empty());
    }

    #[test]
    fn test_validation_accepts_valid_config() {
        let config = valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_missing_records_url() {
        let mut config = valid_config();
        config.upstream.records_base_url = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("upstream.records_base_url"));
    }

    #[test]
    fn test_validation_rejects_missing_bio_key() {
        let mut config = valid_config();
        config.upstream.bio_api_key = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bio_api_key"));
    }

    #[test]
    fn test_explicit_fonts_dir_wins() {
        let mut config = valid_config();
        config.assets.dir = "/srv/cards".into();
        assert_eq!(config.assets.font_dir_path(), Path::new("/srv/cards/fonts"));

        config.assets.fonts_dir = Some("/usr/local/share/fonts".into());
        assert_eq!(config.assets.font_dir_path(), Path::new("/usr/local/share/fonts"));
    }

    #[test]
    fn test_timeouts_convert_to_durations() {
        let mut config = valid_config();
        config.upstream.timeout_ms = Some(2500);
        config.render.measure_timeout_ms = Some(750);
        assert_eq!(config.upstream.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.render.measure_timeout(), Some(Duration::from_millis(750)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origins_from_env_string_are_split_and_trimmed() {
        let json = r#"{"allowed_origins": "https://a.example, https://b.example,,"}"#;
        let cors: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(cors.allowed_origins, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_origins_accept_a_list() {
        let json = r#"{"allowed_origins": ["*"]}"#;
        let cors: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(cors.allowed_origins, ["*"]);
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "card.yaml",
                r"
upstream:
  records_base_url: https://yaml.example.com
  bio_api_key: from-yaml
render:
  font_size: 20
",
            )?;
            jail.set_env("CC_UPSTREAM__RECORDS_BASE_URL", "https://env.example.com");
            jail.set_env("CC_SERVER__PORT", "9090");

            let config = Config::load_from("card.yaml").expect("config loads");
            assert_eq!(config.upstream.records_base_url, "https://env.example.com");
            assert_eq!(config.upstream.bio_api_key, "from-yaml");
            assert_eq!(config.server.port, 9090);
            assert!((config.render.font_size - 20.0).abs() < f32::EPSILON);
            Ok(())
        });
    }

    // Table-driven boundary tests for validation rules

    #[test]
    fn port_boundaries() {
        let cases = [
            (0u16, false, "zero port"),
            (1, true, "minimum valid port"),
            (8080, true, "default port"),
            (65535, true, "maximum port"),
        ];

        for (port, should_pass, desc) in cases {
            let mut config = valid_config();
            config.server.port = port;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn upstream_url_boundaries() {
        let cases = [
            ("https://api.example.com", true, "https"),
            ("http://localhost:3000", true, "http with port"),
            ("ftp://files.example.com", false, "ftp scheme"),
            ("api.example.com", false, "no scheme"),
        ];

        for (url, should_pass, desc) in cases {
            let mut config = valid_config();
            config.upstream.bio_base_url = url.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn render_number_boundaries() {
        let cases = [
            (24.0f32, 1.0f32, true, "defaults"),
            (0.0, 1.0, false, "zero font size"),
            (-3.0, 1.0, false, "negative font size"),
            (24.0, 0.0, false, "zero scale"),
            (24.0, f32::NAN, false, "nan scale"),
            (24.0, 2.0, true, "retina scale"),
        ];

        for (font_size, png_scale, should_pass, desc) in cases {
            let mut config = valid_config();
            config.render.font_size = font_size;
            config.render.png_scale = png_scale;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut config = valid_config();
        config.upstream.timeout_ms = Some(0);
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.render.measure_timeout_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn cors_origin_boundaries() {
        let cases = [
            (vec!["*"], true, "wildcard"),
            (vec!["https://example.com"], true, "https domain"),
            (vec![], true, "empty list"),
            (vec!["localhost"], false, "no scheme"),
        ];

        for (origins, should_pass, desc) in cases {
            let mut config = valid_config();
            config.cors.allowed_origins = origins.into_iter().map(String::from).collect();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn security_header_boundaries() {
        let cases = [
            ("DENY", "cross-origin", true, "defaults"),
            ("sameorigin", "same-site", true, "lowercase frame options"),
            ("ALLOW-FROM", "cross-origin", false, "deprecated ALLOW-FROM"),
            ("", "cross-origin", false, "empty frame options"),
            ("DENY", "anywhere", false, "unknown resource policy"),
        ];

        for (frame_options, resource_policy, should_pass, desc) in cases {
            let mut config = valid_config();
            config.security_headers.frame_options = frame_options.into();
            config.security_headers.resource_policy = resource_policy.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn test_hsts_max_age_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("CC_UPSTREAM__RECORDS_BASE_URL", "https://records.example.com");
            jail.set_env("CC_UPSTREAM__BIO_API_KEY", "key");
            jail.set_env("CC_SECURITY_HEADERS__HSTS_MAX_AGE", "600");

            let config = Config::load_from("missing.yaml").expect("config loads");
            assert_eq!(config.security_headers.hsts_max_age, Some(600));
            assert!(config.security_headers.enabled);
            Ok(())
        });
    }
}
