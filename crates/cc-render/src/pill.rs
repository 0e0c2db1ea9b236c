//! Pill badges laid out left to right across the top of a card.
//!
//! Every visible pill is measured, then placed [`PILL_GAP`] pixels after the
//! previous one's advance. A flag pill that is not present renders nothing
//! and takes no room in the row.

use futures::future::try_join_all;

use crate::measure::{FontSpec, MeasureError, TextMeasurer};

/// Horizontal offset of the first pill.
pub const PILL_LEFT_MARGIN: f32 = 40.0;
/// Space between one pill's advance and the next pill.
pub const PILL_GAP: f32 = 30.0;

const PILL_TOP: f32 = 40.0;
const PILL_HEIGHT: f32 = 44.0;
const PILL_RADIUS: f32 = 20.0;
const TEXT_INSET: f32 = 20.0;
const TEXT_BASELINE: f32 = 30.0;
const ADVANCE_PADDING: f32 = 15.0;

/// What a pill shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PillInput {
    /// A grey badge carrying a text value.
    Labeled { text: String },
    /// A green badge that is only drawn when `present` is true.
    Flag { present: bool, text: String },
}

impl PillInput {
    pub fn labeled(text: impl Into<String>) -> Self {
        Self::Labeled { text: text.into() }
    }

    pub fn flag(present: bool, text: impl Into<String>) -> Self {
        Self::Flag {
            present,
            text: text.into(),
        }
    }

    fn visible_text(&self) -> Option<&str> {
        match self {
            Self::Labeled { text } => Some(text),
            Self::Flag { present: true, text } => Some(text),
            Self::Flag { present: false, .. } => None,
        }
    }

    const fn style(&self) -> PillStyle {
        match self {
            Self::Labeled { .. } => PillStyle {
                background: "#E1E1E1",
                foreground: "#4A4A4A",
                weight: 500,
            },
            Self::Flag { .. } => PillStyle {
                background: "#40C057",
                foreground: "#FFFFFF",
                weight: 400,
            },
        }
    }
}

struct PillStyle {
    background: &'static str,
    foreground: &'static str,
    weight: u16,
}

/// Horizontal offsets for a row of pills with the given advances.
#[must_use]
pub fn layout_offsets(advances: &[f32]) -> Vec<f32> {
    advances
        .iter()
        .scan(PILL_LEFT_MARGIN, |x, advance| {
            let offset = *x;
            *x += advance + PILL_GAP;
            Some(offset)
        })
        .collect()
}

/// Measure and lay out `pills`, returning the concatenated SVG markup.
///
/// Widths are measured concurrently; offsets are folded afterwards in order.
///
/// # Errors
///
/// Returns the first [`MeasureError`] raised by `measurer`.
pub async fn compose_pills(
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
    pills: &[(&str, PillInput)],
) -> Result<String, MeasureError> {
    let visible: Vec<(&str, &str, PillStyle)> = pills
        .iter()
        .filter_map(|(id, input)| input.visible_text().map(|text| (*id, text, input.style())))
        .collect();

    let widths = try_join_all(
        visible
            .iter()
            .map(|(_, text, _)| measurer.measure(text, font)),
    )
    .await?;

    let advances: Vec<f32> = widths
        .iter()
        .map(|width| width + 2.0 * ADVANCE_PADDING)
        .collect();
    let offsets = layout_offsets(&advances);

    let markup = visible
        .iter()
        .zip(widths.iter().zip(offsets))
        .map(|((id, text, style), (width, dx))| pill_markup(id, text, style, *width, dx, font))
        .collect();
    Ok(markup)
}

fn pill_markup(id: &str, text: &str, style: &PillStyle, width: f32, dx: f32, font: &FontSpec) -> String {
    format!(
        r#"
      <g id="{id}" transform="translate({dx}, {PILL_TOP})">
        <rect fill="{bg}" fill-rule="evenodd" x="0" y="0" width="{rect_width}" height="{PILL_HEIGHT}" rx="{PILL_RADIUS}"></rect>
        <text fill="none" font-family="{family}" font-size="{size}" font-weight="{weight}">
          <tspan x="{TEXT_INSET}" y="{TEXT_BASELINE}" fill="{fg}">{text}</tspan>
        </text>
      </g>"#,
        id = htmlize::escape_attribute(id),
        bg = style.background,
        fg = style.foreground,
        rect_width = width + 2.0 * TEXT_INSET,
        family = htmlize::escape_attribute(font.family.as_str()),
        size = font.size,
        weight = style.weight,
        text = htmlize::escape_text(text),
    )
}
