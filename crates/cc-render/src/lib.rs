//! Render primitives for `CongressCard`
//!
//! This crate knows nothing about legislators or bills. It provides the
//! pieces the card service stitches together:
//!
//! - [`Template`] - `{PLACEHOLDER}` substitution into SVG templates
//! - [`compose_pills`] - a left-to-right row of badges sized to their text
//! - [`TextMeasurer`] - rendered text width, backed by `usvg` text layout
//! - [`Rasterizer`] - SVG to PNG conversion, backed by `resvg`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod measure;
mod pill;
mod raster;
mod template;

pub use measure::{
    font_database, FontSpec, MeasureError, TextMeasurer, UsvgTextMeasurer, DEFAULT_FONT_FAMILY,
    MEASURE_NODE_ID,
};
pub use pill::{compose_pills, layout_offsets, PillInput, PILL_GAP, PILL_LEFT_MARGIN};
pub use raster::{RasterError, Rasterizer, ResvgRasterizer};
pub use template::{Template, TemplateValues};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
