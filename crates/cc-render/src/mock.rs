//! Deterministic measurer and rasterizer for tests.

#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]

use std::sync::Mutex;

use async_trait::async_trait;

use crate::measure::{FontSpec, MeasureError, TextMeasurer};
use crate::raster::{RasterError, Rasterizer};

/// Measures every character as `per_char` pixels and records each call.
pub struct FixedWidthMeasurer {
    per_char: f32,
    calls: Mutex<Vec<String>>,
}

impl FixedWidthMeasurer {
    pub fn new(per_char: f32) -> Self {
        Self {
            per_char,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every string passed to `measure`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextMeasurer for FixedWidthMeasurer {
    async fn measure(&self, text: &str, _font: &FontSpec) -> Result<f32, MeasureError> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(text.chars().count() as f32 * self.per_char)
    }
}

/// Always fails with [`MeasureError::NoLayout`].
pub struct FailingMeasurer;

#[async_trait]
impl TextMeasurer for FailingMeasurer {
    async fn measure(&self, text: &str, _font: &FontSpec) -> Result<f32, MeasureError> {
        Err(MeasureError::NoLayout(text.to_string()))
    }
}

/// "Rasterizes" by prefixing the SVG bytes with [`EchoRasterizer::MAGIC`].
pub struct EchoRasterizer;

impl EchoRasterizer {
    pub const MAGIC: &'static [u8] = b"PNG:";

    /// The bytes this rasterizer produces for `svg`.
    pub fn expected(svg: &str) -> Vec<u8> {
        let mut bytes = Self::MAGIC.to_vec();
        bytes.extend_from_slice(svg.as_bytes());
        bytes
    }
}

#[async_trait]
impl Rasterizer for EchoRasterizer {
    async fn svg_to_png(&self, svg: &str) -> Result<Vec<u8>, RasterError> {
        Ok(Self::expected(svg))
    }
}

/// Always fails with [`RasterError::SvgParse`].
pub struct FailingRasterizer;

#[async_trait]
impl Rasterizer for FailingRasterizer {
    async fn svg_to_png(&self, _svg: &str) -> Result<Vec<u8>, RasterError> {
        Err(RasterError::SvgParse("rasterizer unavailable".to_string()))
    }
}
