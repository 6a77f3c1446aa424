//! Resolves a YouTube video id for a track through the YouTube Data API.

use anyhow::{anyhow, Context as _, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

impl SearchListResponse {
    fn first_video(self) -> Option<String> {
        self.items.into_iter().find_map(|i| i.id.video_id)
    }
}

pub struct YoutubeClient {
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl YoutubeClient {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
        }
    }

    /// Return the id of the best matching video, if any
    #[instrument(skip(self))]
    pub async fn search_video(&self, query: &str) -> Result<Option<String>> {
        let params = [
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", "1"),
            ("q", query),
            ("key", self.api_key.as_str()),
        ];
        let response = self.client.get(SEARCH_URL).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("YouTube search failed: {}", response.status()));
        }
        let body: SearchListResponse = response
            .json()
            .await
            .context("Failed to decode YouTube search response")?;
        let video = body.first_video();
        debug!(?video, "YouTube search finished");
        Ok(video)
    }
}
