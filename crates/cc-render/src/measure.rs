//! Rendered text width measurement.
//!
//! Each measurement lays out a throwaway one-element SVG document through
//! `usvg` and reads back the bounding box of the text node. The document and
//! its tree live only for the duration of the call; the font database is
//! loaded once and shared read-only.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use usvg::fontdb;

/// Id of the text element inside the measurement document.
pub const MEASURE_NODE_ID: &str = "svg-text";

/// Preferred pill faces, ending in the generic family so a face is always found.
pub const DEFAULT_FONT_FAMILY: &str = "SF Pro Display, Helvetica, DejaVu Sans, sans-serif";

/// Faces tried, in order, when binding the generic `sans-serif` and `serif`
/// names. If none is installed the first loaded face is used.
const GENERIC_CANDIDATES: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];

/// Font settings used for both measuring and drawing text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: 24.0,
            weight: 400,
        }
    }
}

/// Errors that can occur while measuring text.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    /// The measurement document could not be laid out
    #[error("text layout failed: {0}")]
    Layout(String),

    /// Layout succeeded but produced no text node (usually no usable font)
    #[error("no text layout produced for {0:?}")]
    NoLayout(String),

    #[error("text measurement timed out after {0:?}")]
    Timeout(Duration),

    #[error("text measurement task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Measures the rendered width of a string in pixels.
#[async_trait]
pub trait TextMeasurer: Send + Sync {
    async fn measure(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError>;
}

/// Load the system fonts plus any fonts found in `extra_dir`, then point the
/// generic `sans-serif` and `serif` families at a face that is present.
///
/// fontdb binds the generics to Arial and Times New Roman regardless of what
/// is installed; usvg drops text whose families all miss.
#[must_use]
pub fn font_database(extra_dir: Option<&Path>) -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = extra_dir {
        db.load_fonts_dir(dir);
    }
    match bind_generic_families(&mut db) {
        Some(family) => tracing::debug!(faces = db.len(), %family, "font database loaded"),
        None => tracing::warn!("no fonts found, text measurement will fail"),
    }
    Arc::new(db)
}

fn bind_generic_families(db: &mut fontdb::Database) -> Option<String> {
    let installed =
        |name: &str| db.faces().any(|face| face.families.iter().any(|(family, _)| family == name));
    let family = GENERIC_CANDIDATES
        .iter()
        .copied()
        .find(|name| installed(name))
        .map(str::to_string)
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(family, _)| family.clone()))
        })?;

    db.set_sans_serif_family(family.clone());
    db.set_serif_family(family.clone());
    Some(family)
}

/// [`TextMeasurer`] backed by `usvg` text layout.
pub struct UsvgTextMeasurer {
    fontdb: Arc<fontdb::Database>,
    timeout: Option<Duration>,
}

impl UsvgTextMeasurer {
    pub fn new(fontdb: Arc<fontdb::Database>) -> Self {
        Self {
            fontdb,
            timeout: None,
        }
    }

    /// Bound every measurement by `timeout`. `None` leaves it unbounded.
    ///
    /// The bound applies to the caller only. Layout runs on the blocking pool
    /// and cannot be interrupted, so a timed-out layout still runs to
    /// completion in the background before its document is dropped.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl TextMeasurer for UsvgTextMeasurer {
    async fn measure(&self, text: &str, font: &FontSpec) -> Result<f32, MeasureError> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        let document = measurement_document(text, font);
        let fontdb = Arc::clone(&self.fontdb);
        let label = text.to_string();
        let task =
            tokio::task::spawn_blocking(move || measure_document(fontdb, &document, label));

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| MeasureError::Timeout(limit))??,
            None => task.await?,
        }
    }
}

fn measurement_document(text: &str, font: &FontSpec) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4096" height="256"><text id="{MEASURE_NODE_ID}" x="0" y="128" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="#FFFFFF">{text}</text></svg>"##,
        family = htmlize::escape_attribute(font.family.as_str()),
        size = font.size,
        weight = font.weight,
        text = htmlize::escape_text(text),
    )
}

fn measure_document(
    fontdb: Arc<fontdb::Database>,
    document: &str,
    label: String,
) -> Result<f32, MeasureError> {
    let options = usvg::Options {
        fontdb,
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(document, &options)
        .map_err(|e| MeasureError::Layout(e.to_string()))?;
    let node = tree
        .node_by_id(MEASURE_NODE_ID)
        .ok_or(MeasureError::NoLayout(label))?;
    Ok(node.abs_bounding_box().width())
}
