use anyhow::{anyhow, Context as _, Result};
use reqwest::{Client, Response};
use tracing::{debug, error, instrument};

use crate::lrclib::types::{LrclibConfig, TrackRecord, TrackSummary};

/// LRCLIB API client
pub struct LrclibClient {
    config: LrclibConfig,
    client: Client,
}

impl LrclibClient {
    /// Create new LRCLIB client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: LrclibConfig) -> Result<Self> {
        // LRCLIB asks clients to identify themselves
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Search tracks by free text
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<TrackSummary>> {
        let url = self.endpoint("search");
        debug!("Search URL: {}", url);

        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        let results: Vec<TrackSummary> = check_status(response, "Search")
            .await?
            .json()
            .await
            .context("Failed to decode search response")?;

        debug!("LRCLIB returned {} results", results.len());
        Ok(results)
    }

    /// Fetch a track, including its lyrics, by LRCLIB id
    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<TrackRecord> {
        let url = self.endpoint(&format!("get/{id}"));
        debug!("Lyrics URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let record: TrackRecord = check_status(response, "Lyrics")
            .await?
            .json()
            .await
            .context("Failed to decode lyrics response")?;

        debug!(
            track = %record.track_name,
            artist = %record.artist_name,
            synced = record.synced_lyrics.is_some(),
            "Fetched track"
        );
        Ok(record)
    }
}

async fn check_status(response: Response, what: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!("{} request failed: {} - {}", what, status, body);
    Err(anyhow!("{what} request failed: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let client = LrclibClient::new(LrclibConfig {
            base_url: "http://localhost:3000/".to_owned(),
        })
        .unwrap();
        assert_eq!(client.endpoint("search"), "http://localhost:3000/api/search");
        assert_eq!(client.endpoint("get/12"), "http://localhost:3000/api/get/12");
    }
}
