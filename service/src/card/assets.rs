//! Static card assets, loaded once at startup and shared read-only.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use cc_render::Template;
use thiserror::Error;

use super::pipeline::EntityKind;
use super::states::StateTable;

pub const MEMBER_TEMPLATE_FILE: &str = "member-card-template.svg";
pub const BILL_TEMPLATE_FILE: &str = "bill-card-template.svg";
pub const DEFAULT_AVATAR_FILE: &str = "default-avatar.png";
pub const FB_ICON_FILE: &str = "icon-fb.png";
pub const IG_ICON_FILE: &str = "icon-ig.png";
pub const LINE_ICON_FILE: &str = "icon-line.png";
pub const STATES_FILE: &str = "states.json";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {} is not valid UTF-8", path.display())]
    Utf8 { path: PathBuf },

    #[error("invalid state table {}: {source}", path.display())]
    StateTable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Templates, pre-encoded images and the state table.
#[derive(Debug, Clone)]
pub struct CardAssets {
    pub member_template: Template,
    pub bill_template: Template,
    /// Data URI of the avatar used when a member has no usable picture
    pub default_avatar: String,
    pub fb_icon: String,
    pub ig_icon: String,
    pub line_icon: String,
    pub states: StateTable,
}

impl CardAssets {
    /// Load every asset from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if a file is missing or malformed.
    pub async fn load(dir: &Path) -> Result<Self, AssetError> {
        let states_path = dir.join(STATES_FILE);
        let states_json = read_text(&states_path).await?;
        let states =
            StateTable::from_json(&states_json).map_err(|source| AssetError::StateTable {
                path: states_path,
                source,
            })?;

        let assets = Self {
            member_template: Template::new(read_text(&dir.join(MEMBER_TEMPLATE_FILE)).await?),
            bill_template: Template::new(read_text(&dir.join(BILL_TEMPLATE_FILE)).await?),
            default_avatar: data_uri(&read_bytes(&dir.join(DEFAULT_AVATAR_FILE)).await?),
            fb_icon: data_uri(&read_bytes(&dir.join(FB_ICON_FILE)).await?),
            ig_icon: data_uri(&read_bytes(&dir.join(IG_ICON_FILE)).await?),
            line_icon: data_uri(&read_bytes(&dir.join(LINE_ICON_FILE)).await?),
            states,
        };
        tracing::info!(dir = %dir.display(), states = assets.states.len(), "card assets loaded");
        Ok(assets)
    }

    /// The unpopulated template for `kind`.
    #[must_use]
    pub const fn template(&self, kind: EntityKind) -> &Template {
        match kind {
            EntityKind::Member => &self.member_template,
            EntityKind::Bill => &self.bill_template,
        }
    }
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
    tokio::fs::read(path).await.map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

async fn read_text(path: &Path) -> Result<String, AssetError> {
    String::from_utf8(read_bytes(path).await?).map_err(|_| AssetError::Utf8 {
        path: path.to_path_buf(),
    })
}

/// Inline image data URI. JPEG is recognized by its magic bytes; anything
/// else is labeled PNG.
#[must_use]
pub fn data_uri(bytes: &[u8]) -> String {
    let mime = if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else {
        "image/png"
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
