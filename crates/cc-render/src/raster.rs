//! SVG to PNG conversion through `resvg`.

use std::sync::Arc;

use async_trait::async_trait;
use resvg::tiny_skia;
use usvg::fontdb;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    SvgParse(String),

    #[error("failed to allocate {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    PngEncode(String),

    #[error("raster task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Converts composed SVG markup into PNG bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn svg_to_png(&self, svg: &str) -> Result<Vec<u8>, RasterError>;
}

/// [`Rasterizer`] backed by `resvg`, sized from the SVG's own width/height.
pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
    scale: f32,
}

impl ResvgRasterizer {
    pub fn new(fontdb: Arc<fontdb::Database>, scale: f32) -> Self {
        Self { fontdb, scale }
    }
}

#[async_trait]
impl Rasterizer for ResvgRasterizer {
    async fn svg_to_png(&self, svg: &str) -> Result<Vec<u8>, RasterError> {
        let fontdb = Arc::clone(&self.fontdb);
        let scale = self.scale;
        let svg = svg.to_string();
        tokio::task::spawn_blocking(move || render_png(fontdb, &svg, scale)).await?
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_png(fontdb: Arc<fontdb::Database>, svg: &str, scale: f32) -> Result<Vec<u8>, RasterError> {
    let options = usvg::Options {
        fontdb,
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|e| RasterError::SvgParse(e.to_string()))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|e| RasterError::PngEncode(e.to_string()))
}
