//! Per-request card pipeline: fetch, derive, compose, convert.
//!
//! Any failure before conversion degrades the response to the unpopulated
//! template in the requested format. Conversion failures are returned to
//! the caller as [`ConversionError`].

use std::sync::Arc;

use cc_render::{compose_pills, FontSpec, Rasterizer, TextMeasurer};

use crate::congress::{CongressApiClient, Lang};

use super::assets::CardAssets;
use super::bill::load_bill_card;
use super::error::{CardError, ConversionError};
use super::member::load_member_card;

/// The kind of entity a card describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Member,
    Bill,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Bill => "bill",
        }
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

/// What to do with a raw `{id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRequest {
    /// Render the card for `id` (suffix stripped) in `format`.
    Render { id: String, format: ImageFormat },
    /// No image suffix: answer with the raw segment as plain text.
    Echo(String),
}

impl CardRequest {
    /// Classify a path segment by its case-insensitive `.png` / `.svg` suffix.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        let format = if lower.ends_with(".png") {
            ImageFormat::Png
        } else if lower.ends_with(".svg") {
            ImageFormat::Svg
        } else {
            return Self::Echo(raw.to_string());
        };
        Self::Render {
            id: raw[..raw.len() - 4].to_string(),
            format,
        }
    }
}

/// Bytes and content type of a rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Renders cards from shared, read-only collaborators.
pub struct CardService {
    client: Arc<dyn CongressApiClient>,
    measurer: Arc<dyn TextMeasurer>,
    rasterizer: Arc<dyn Rasterizer>,
    assets: Arc<CardAssets>,
    font: FontSpec,
}

impl CardService {
    pub fn new(
        client: Arc<dyn CongressApiClient>,
        measurer: Arc<dyn TextMeasurer>,
        rasterizer: Arc<dyn Rasterizer>,
        assets: Arc<CardAssets>,
        font: FontSpec,
    ) -> Self {
        Self {
            client,
            measurer,
            rasterizer,
            assets,
            font,
        }
    }

    #[must_use]
    pub fn assets(&self) -> &CardAssets {
        &self.assets
    }

    /// Render the card for `id`, falling back to the blank template on any
    /// fetch, derivation or layout failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if PNG conversion fails.
    pub async fn render_card(
        &self,
        kind: EntityKind,
        id: &str,
        lang: Lang,
        format: ImageFormat,
    ) -> Result<RenderedCard, ConversionError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.render_card_at(kind, id, lang, format, now_ms).await
    }

    /// [`render_card`](Self::render_card) with an explicit "now" for the
    /// in-office check.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if PNG conversion fails.
    pub async fn render_card_at(
        &self,
        kind: EntityKind,
        id: &str,
        lang: Lang,
        format: ImageFormat,
        now_ms: i64,
    ) -> Result<RenderedCard, ConversionError> {
        let svg = match self.compose(kind, id, lang, now_ms).await {
            Ok(svg) => svg,
            Err(e) => {
                tracing::warn!(
                    kind = kind.as_str(),
                    %id,
                    lang = lang.as_str(),
                    stage = ?e.stage(),
                    error = %e,
                    "card pipeline failed, serving blank template"
                );
                self.assets.template(kind).as_str().to_string()
            }
        };
        self.convert(svg, format).await
    }

    async fn compose(
        &self,
        kind: EntityKind,
        id: &str,
        lang: Lang,
        now_ms: i64,
    ) -> Result<String, CardError> {
        let client = self.client.as_ref();
        let measurer = self.measurer.as_ref();
        let template = self.assets.template(kind);

        let values = match kind {
            EntityKind::Member => {
                let card = load_member_card(client, &self.assets, id, lang, now_ms).await?;
                let pills = compose_pills(measurer, &self.font, &card.pills(lang)).await?;
                card.template_values(pills, &self.assets)
            }
            EntityKind::Bill => {
                let card = load_bill_card(client, &self.assets, id, lang).await?;
                let pills = compose_pills(measurer, &self.font, &card.pills(lang)).await?;
                card.template_values(pills, &self.assets)
            }
        };
        Ok(template.render(&values))
    }

    async fn convert(&self, svg: String, format: ImageFormat) -> Result<RenderedCard, ConversionError> {
        let bytes = match format {
            ImageFormat::Svg => svg.into_bytes(),
            ImageFormat::Png => self.rasterizer.svg_to_png(&svg).await?,
        };
        Ok(RenderedCard {
            bytes,
            content_type: format.content_type(),
        })
    }
}
