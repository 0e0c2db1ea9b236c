//! Profile picture download with silent fallback to the default avatar.

use crate::congress::{CongressApiClient, ProfilePictures};

use super::assets::data_uri;

/// Data URI of the 200px profile picture, or `default_avatar` when the
/// record has none or the download fails.
pub async fn profile_picture(
    client: &dyn CongressApiClient,
    pictures: Option<&ProfilePictures>,
    default_avatar: &str,
) -> String {
    let Some(url) = pictures.and_then(|p| p.px200.as_deref()) else {
        return default_avatar.to_string();
    };

    match client.fetch_picture(url).await {
        Ok(bytes) => data_uri(&bytes),
        Err(e) => {
            tracing::debug!(error = %e, "profile picture unavailable, using default avatar");
            default_avatar.to_string()
        }
    }
}
