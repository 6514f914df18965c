//! RAWG response types and platform flattening.

use serde::{Deserialize, Serialize};

/// Raw search response from RAWG.
#[derive(Debug, Deserialize)]
pub struct RawgSearchResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<RawGame>,
}

/// One game as RAWG returns it, platforms still nested.
#[derive(Debug, Deserialize)]
pub struct RawGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
}

/// RAWG wraps each platform in an object keyed `platform`.
#[derive(Debug, Deserialize)]
pub struct PlatformEntry {
    pub platform: PlatformRef,
}

/// The platform record itself; only the name is kept.
#[derive(Debug, Deserialize)]
pub struct PlatformRef {
    pub name: String,
}

/// One normalized game result with a flat platform-name list.
#[derive(Debug, Clone, Serialize)]
pub struct GameItem {
    pub id: u64,
    pub name: String,
    pub background_image: Option<String>,
    pub released: Option<String>,
    pub platforms: Vec<String>,
}

impl From<RawGame> for GameItem {
    fn from(raw: RawGame) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            background_image: raw.background_image,
            released: raw.released,
            platforms: raw.platforms.into_iter().map(|entry| entry.platform.name).collect(),
        }
    }
}
