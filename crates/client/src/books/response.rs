//! Google Books response types and https rewriting.

use serde::{Deserialize, Serialize};

/// Raw search response from the volumes endpoint.
#[derive(Debug, Deserialize)]
pub struct BooksSearchResponse {
    #[serde(default, rename = "totalItems")]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<BookItem>,
}

/// One book volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookItem {
    pub id: String,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

/// The subset of Google's volumeInfo the gateway forwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_volume_link: Option<String>,
}

/// Cover thumbnail links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl BookItem {
    /// Rewrite every embedded link to https.
    pub fn into_secure(mut self) -> Self {
        let info = &mut self.volume_info;
        secure_in_place(&mut info.info_link);
        secure_in_place(&mut info.preview_link);
        secure_in_place(&mut info.canonical_volume_link);
        if let Some(links) = &mut info.image_links {
            secure_in_place(&mut links.small_thumbnail);
            secure_in_place(&mut links.thumbnail);
        }
        self
    }
}

fn secure_in_place(link: &mut Option<String>) {
    if let Some(value) = link.take() {
        *link = Some(to_https(value));
    }
}

/// Upgrade a plain-http URL to https.
///
/// Idempotent: already-secure URLs and non-HTTP values pass through
/// unchanged.
pub fn to_https(url: String) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url,
    }
}
