use std::{io, time::Duration};

use anyhow::Result;
use args::{Args, Command, PlayOptions};
use clap::Parser as _;
use event_loop::event_loop;
use lrclib::{LrclibClient, LrclibConfig};
use output::format_search_results;
use youtube::YoutubeClient;

mod args;
mod elements;
mod event_loop;
mod lrc;
mod lrclib;
mod output;
mod player;
mod session;
mod sync;
mod youtube;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.init_tracing_subscriber()?;

    let lrclib = LrclibClient::new(LrclibConfig {
        base_url: args.lrclib_url,
    })?;

    match args.command {
        Command::Search { query } => {
            let results = lrclib.search(&query.join(" ")).await?;
            if results.is_empty() {
                tracing::warn!("No tracks found");
            }
            format_search_results(&results, args.format, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Play {
            id,
            poll_interval,
            no_autoplay,
            no_tiles,
        } => {
            let youtube = args.youtube_api_key.map(YoutubeClient::new);
            let options = PlayOptions {
                poll_interval: Duration::from_millis(poll_interval.max(1)),
                autoplay: !no_autoplay,
                tiles: !no_tiles,
                format: args.format,
            };
            event_loop(lrclib, youtube, id, options).await
        }
    }
}
