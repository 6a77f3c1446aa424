use serde::{Deserialize, Serialize};

use crate::lrc::Lyrics;

/// Configuration for the LRCLIB connection
#[derive(Debug, Clone)]
pub struct LrclibConfig {
    pub base_url: String,
}

/// One entry of `GET /api/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: u64,
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
}

/// Response of `GET /api/get/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub id: u64,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

impl TrackRecord {
    /// Parsed synced lyrics, empty if the track has none.
    #[must_use]
    pub fn lyrics(&self) -> Lyrics {
        self.synced_lyrics
            .as_deref()
            .map(Lyrics::parse)
            .unwrap_or_default()
    }

    /// Free text query identifying the track on other services.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{} {}", self.track_name, self.artist_name)
    }
}
