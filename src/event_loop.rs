use std::{cell::RefCell, rc::Rc, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context as _, Result};
use tokio::{
    io::{stdin, AsyncBufReadExt as _, BufReader},
    select,
};

use crate::{
    args::PlayOptions,
    lrclib::{LrclibClient, TrackRecord},
    output::{format_track_header, LyricFrame},
    player::{ClockPlayerFactory, PlaybackStatus, PlayerFactory, VideoPlayer as _, VideoSource},
    session::{Session, SessionEvent},
    sync::{ActiveLyric, Listener},
    youtube::YoutubeClient,
};

/// A line typed on stdin.
#[derive(Debug, Clone, PartialEq)]
enum UserCommand {
    Toggle,
    Play,
    Pause,
    Seek(Duration),
    Load(u64),
    Quit,
}

impl FromStr for UserCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            None | Some("t" | "toggle") => Self::Toggle,
            Some("p" | "play") => Self::Play,
            Some("pause") => Self::Pause,
            Some("s" | "seek") => {
                let secs = words.next().ok_or_else(|| anyhow!("seek needs a position"))?;
                let secs = secs
                    .parse::<f64>()
                    .with_context(|| format!("Failed to parse {secs} as seconds"))?;
                Self::Seek(
                    Duration::try_from_secs_f64(secs)
                        .with_context(|| format!("Invalid position {secs}"))?,
                )
            }
            Some("l" | "load") => {
                let id = words.next().ok_or_else(|| anyhow!("load needs a track id"))?;
                Self::Load(
                    id.parse()
                        .with_context(|| format!("Failed to parse {id} as track id"))?,
                )
            }
            Some("q" | "quit" | "exit") => Self::Quit,
            Some(other) => bail!("Unknown command {other}"),
        };
        if let Some(extra) = words.next() {
            bail!("Unexpected argument {extra}");
        }
        Ok(command)
    }
}

/// Fetches tracks and puts them on screen.
struct TrackLoader {
    lrclib: LrclibClient,
    youtube: Option<YoutubeClient>,
    options: PlayOptions,
    /// Label of the track the printed frames belong to
    now_playing: Rc<RefCell<Option<String>>>,
}

impl TrackLoader {
    /// A listener printing every lyric change to stdout.
    fn printer(&self) -> Listener {
        let (format, tiles) = (self.options.format, self.options.tiles);
        let now_playing = Rc::clone(&self.now_playing);
        Rc::new(move |lyric: &ActiveLyric| {
            if let Err(e) = lyric_frame(lyric.as_str(), tiles, &now_playing).print(format) {
                tracing::error!(?e, "Failed to print lyric");
            }
        })
    }

    /// Fetch a track and swap it into the session.
    async fn load(&self, session: &mut Session<ClockPlayerFactory>, id: u64) -> Result<()> {
        let record = self
            .lrclib
            .get(id)
            .await
            .with_context(|| format!("Failed to fetch track {id}"))?;
        let source = resolve_source(&record, self.youtube.as_ref()).await;
        let lyrics = record.lyrics();
        if lyrics.is_empty() {
            tracing::warn!(id, "Track has no synced lyrics");
        }

        format_track_header(
            &record,
            &source.id,
            self.options.format,
            &mut std::io::stdout().lock(),
        )?;
        let label = source.label.clone();
        session.replace(source, lyrics)?;
        *self.now_playing.borrow_mut() = Some(label);
        Ok(())
    }
}

fn lyric_frame(text: &str, tiles: bool, now_playing: &RefCell<Option<String>>) -> LyricFrame {
    LyricFrame::new(text, tiles, now_playing.borrow().as_deref())
}

async fn resolve_source(record: &TrackRecord, youtube: Option<&YoutubeClient>) -> VideoSource {
    let video = match youtube {
        Some(youtube) => youtube
            .search_video(&record.query())
            .await
            .inspect_err(|e| tracing::warn!(?e, "Failed to look up video"))
            .ok()
            .flatten(),
        None => None,
    };
    VideoSource {
        id: video.unwrap_or_else(|| format!("lrclib:{}", record.id)),
        label: format!("{} - {}", record.artist_name, record.track_name),
        duration: record
            .duration
            .and_then(|d| Duration::try_from_secs_f64(d).ok())
            .filter(|d| !d.is_zero()),
    }
}

/// Once stdin is gone, only a playing track can still reach its end.
fn can_continue_without_input<F: PlayerFactory>(session: &Session<F>) -> bool {
    session
        .player()
        .is_some_and(|p| p.status() == PlaybackStatus::Playing)
}

/// Apply a user command. Returns `false` when the loop should end.
async fn handle_command(
    command: UserCommand,
    session: &mut Session<ClockPlayerFactory>,
    loader: &TrackLoader,
) -> bool {
    tracing::debug!(?command, "User command");
    match command {
        UserCommand::Quit => return false,
        UserCommand::Load(id) => {
            if let Err(e) = loader.load(session, id).await {
                tracing::error!(?e, "Failed to load track");
            }
            return true;
        }
        _ => {}
    }

    let Some(player) = session.player() else {
        tracing::warn!("No track loaded");
        return true;
    };
    match command {
        UserCommand::Toggle if player.status() == PlaybackStatus::Playing => player.pause(),
        UserCommand::Toggle | UserCommand::Play => player.play(),
        UserCommand::Pause => player.pause(),
        UserCommand::Seek(to) => player.seek(to),
        UserCommand::Load(_) | UserCommand::Quit => {}
    }
    true
}

pub async fn event_loop(
    lrclib: LrclibClient,
    youtube: Option<YoutubeClient>,
    id: u64,
    options: PlayOptions,
) -> Result<()> {
    let mut session = Session::new(
        ClockPlayerFactory {
            autoplay: options.autoplay,
        },
        options.poll_interval,
    );
    let loader = TrackLoader {
        lrclib,
        youtube,
        options,
        now_playing: Rc::default(),
    };
    session.subscribe(loader.printer());

    loader.load(&mut session, id).await?;

    let mut commands = BufReader::new(stdin()).lines();
    let mut stdin_open = true;

    loop {
        select! {
            line = commands.next_line(), if stdin_open => {
                let line = line.unwrap_or_else(|e| {
                    tracing::error!(?e, "Failed to read command");
                    None
                });
                let Some(line) = line else {
                    tracing::info!("stdin closed, no more commands");
                    stdin_open = false;
                    if can_continue_without_input(&session) {
                        continue;
                    }
                    break;
                };
                let command = match line.parse::<UserCommand>() {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!(%e, "Ignoring command");
                        continue
                    }
                };
                if !handle_command(command, &mut session, &loader).await {
                    break;
                }
            }
            event = session.next_event() => match event {
                SessionEvent::Status(status) => {
                    session.on_status(status);
                    if let Some(driver) = session.driver() {
                        tracing::info!(
                            %status,
                            polling = driver.is_polling(),
                            lyric = %driver.active(),
                            "Player status changed"
                        );
                    }
                    if status == PlaybackStatus::Stopped {
                        break;
                    }
                }
                SessionEvent::Tick => {
                    session.tick();
                }
            },
        }
    }

    session.teardown();
    Ok(())
}
