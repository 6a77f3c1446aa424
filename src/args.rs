use std::{fs::File, io, sync::Mutex, time::Duration};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{lrclib::DEFAULT_BASE_URL, output::OutputFormat, sync::DEFAULT_POLL_INTERVAL_MS};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File to write the log to. If not specified, logs will be written to stderr.
    #[clap(long, short, global = true)]
    log_file: Option<String>,
    /// How to print lyrics and search results
    #[clap(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// LRCLIB server to query
    #[clap(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub lrclib_url: String,
    /// YouTube Data API key, used to look up a video for the track
    #[clap(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search LRCLIB for tracks
    Search {
        /// Free text query, e.g. a title and an artist
        #[clap(required = true)]
        query: Vec<String>,
    },
    /// Play the lyrics of a track. Commands are read from stdin:
    /// `toggle` (or an empty line), `play`, `pause`, `seek <seconds>`, `load <id>`, `quit`.
    Play {
        /// LRCLIB track id, as printed by `search`
        id: u64,
        /// Milliseconds between two lyric lookups
        #[clap(long, short, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        poll_interval: u64,
        /// Start paused instead of playing immediately
        #[clap(long)]
        no_autoplay: bool,
        /// Print the plain lyric instead of element tiles
        #[clap(long)]
        no_tiles: bool,
    },
}

/// Settings of the `play` command.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub poll_interval: Duration,
    pub autoplay: bool,
    pub tiles: bool,
    pub format: OutputFormat,
}

impl Args {
    /// Build the tracing subscriber using parameters from the command line arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created.
    pub fn init_tracing_subscriber(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env());

        match self.log_file.as_ref() {
            None => builder.with_writer(io::stderr).init(),
            Some(f) => builder
                .with_writer(Mutex::new(
                    File::create(f).with_context(|| format!("Failed to create log file {f}"))?,
                ))
                .init(),
        }
        Ok(())
    }
}
