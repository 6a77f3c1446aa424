//! Client for the [LRCLIB](https://lrclib.net) lyrics database.

pub mod api;
pub mod types;

pub use api::LrclibClient;
pub use types::{LrclibConfig, TrackRecord, TrackSummary};

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response() {
        const BODY: &str = r#"[
          {
            "id": 3396226,
            "trackName": "I Want to Live",
            "name": "I Want to Live",
            "artistName": "Borislav Slavov",
            "albumName": "Baldur's Gate 3 (Original Game Soundtrack)",
            "duration": 233.0,
            "instrumental": false,
            "plainLyrics": "I feel your breath upon my neck",
            "syncedLyrics": "[00:17.12] I feel your breath upon my neck"
          },
          {
            "id": 42,
            "name": "Untitled",
            "artistName": "Nobody",
            "albumName": null,
            "duration": 61.5,
            "instrumental": true,
            "plainLyrics": null,
            "syncedLyrics": null
          }
        ]"#;

        let results: Vec<TrackSummary> = serde_json::from_str(BODY).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 3_396_226);
        assert_eq!(results[0].artist_name, "Borislav Slavov");
        assert_eq!(results[0].duration, 233.0);
        assert_eq!(results[1].plain_lyrics, None);
    }

    #[test]
    fn record_with_synced_lyrics() {
        const BODY: &str = r#"{
          "id": 3396226,
          "trackName": "I Want to Live",
          "artistName": "Borislav Slavov",
          "albumName": "Baldur's Gate 3 (Original Game Soundtrack)",
          "duration": 233,
          "instrumental": false,
          "plainLyrics": "I feel your breath upon my neck\nA soft caress as cold as death",
          "syncedLyrics": "[00:17.12] I feel your breath upon my neck\n[00:20.41] A soft caress as cold as death\n[00:23.00] "
        }"#;

        let record: TrackRecord = serde_json::from_str(BODY).unwrap();
        assert_eq!(record.query(), "I Want to Live Borislav Slavov");
        let lyrics = record.lyrics();
        assert_eq!(lyrics.len(), 2);
        assert_eq!(lyrics.entries()[1].time.as_millis(), 20_410);
        assert_eq!(lyrics.entries()[1].text, "A soft caress as cold as death");
    }

    #[test]
    fn record_without_synced_lyrics() {
        const BODY: &str = r#"{
          "id": 7,
          "trackName": "Spoken",
          "artistName": "Someone",
          "plainLyrics": "no timing here"
        }"#;

        let record: TrackRecord = serde_json::from_str(BODY).unwrap();
        assert!(record.lyrics().is_empty());
    }
}
