use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    elements::{decompose_line, Tile, TileKind},
    lrclib::{TrackRecord, TrackSummary},
};

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// What is currently on screen, serialized once per lyric change.
#[derive(Serialize, Debug, Default)]
pub struct LyricFrame {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tiles: Option<Vec<Tile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track: Option<String>,
}

impl LyricFrame {
    /// Create a new frame, spelling the lyric with element tiles when `tiles` is set.
    pub fn new(text: &str, tiles: bool, track: Option<&str>) -> Self {
        Self {
            text: text.to_owned(),
            tiles: tiles.then(|| decompose_line(text)),
            track: track.map(String::from),
        }
    }

    /// Write the frame in the given format, followed by a newline.
    ///
    /// # Errors
    ///
    /// This function will return an error if writing to the given writer fails.
    pub fn format<T: Write>(&self, format: OutputFormat, mut f: &mut T) -> io::Result<()> {
        match format {
            OutputFormat::Json => serde_json::to_writer(&mut f, self)?,
            OutputFormat::Text => match &self.tiles {
                Some(tiles) if !tiles.is_empty() => write!(f, "{}", render_tiles(tiles))?,
                _ => f.write_all(self.text.as_bytes())?,
            },
        }
        f.write_all(b"\n")?;
        Ok(())
    }

    /// Print the frame to stdout.
    ///
    /// # Errors
    ///
    /// This function will return an error if writing to stdout fails.
    pub fn print(&self, format: OutputFormat) -> io::Result<()> {
        self.format(format, &mut io::stdout().lock())
    }
}

fn render_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| match t.kind {
            TileKind::Separator => t.symbol.clone(),
            _ => format!("{}({})", t.symbol, t.short_name()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a duration in seconds as `m:ss`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    // Saturating float to int conversion, negative durations show as 0:00
    let seconds = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Write search results, one per line.
///
/// # Errors
///
/// This function will return an error if writing to the given writer fails.
pub fn format_search_results<T: Write>(
    results: &[TrackSummary],
    format: OutputFormat,
    mut f: &mut T,
) -> io::Result<()> {
    for track in results {
        match format {
            OutputFormat::Json => serde_json::to_writer(&mut f, track)?,
            OutputFormat::Text => {
                write!(f, "{:>10}  {} — {}", track.id, track.name, track.artist_name)?;
                if let Some(album) = track.album_name.as_deref().filter(|a| !a.is_empty()) {
                    write!(f, " [{album}]")?;
                }
                write!(f, " {}", format_duration(track.duration))?;
            }
        }
        f.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the header announcing a freshly loaded track.
///
/// # Errors
///
/// This function will return an error if writing to the given writer fails.
pub fn format_track_header<T: Write>(
    record: &TrackRecord,
    video: &str,
    format: OutputFormat,
    mut f: &mut T,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(
            &mut f,
            &serde_json::json!({
                "track": record.track_name,
                "artist": record.artist_name,
                "album": record.album_name,
                "video": video,
                "synced": record.synced_lyrics.is_some(),
            }),
        )?,
        OutputFormat::Text => {
            write!(f, "♪ {} — {}", record.track_name, record.artist_name)?;
            if record.synced_lyrics.is_none() {
                f.write_all(" (no synced lyrics)".as_bytes())?;
            }
        }
    }
    f.write_all(b"\n")?;
    Ok(())
}
