use std::{fmt, time::Duration};

use anyhow::Result;
use tokio::{sync::watch, time::Instant};

use crate::sync::PlaybackClock;

/// Current playback status of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}
impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        })
    }
}

/// Identity of a playable track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    /// External identifier, e.g. a YouTube video id
    pub id: String,
    /// Human readable name
    pub label: String,
    pub duration: Option<Duration>,
}

/// The part of a video player the lyric display needs.
pub trait VideoPlayer: PlaybackClock {
    fn source(&self) -> &VideoSource;
    fn play(&self);
    fn pause(&self);
    fn seek(&self, to: Duration);
    fn status(&self) -> PlaybackStatus;
    /// A receiver notified on every status change.
    fn status_changes(&self) -> watch::Receiver<PlaybackStatus>;
}

/// Builds a player for a track.
pub trait PlayerFactory {
    type Player: VideoPlayer;

    /// # Errors
    ///
    /// Returns an error if the player cannot be created for this source.
    fn construct(&mut self, source: VideoSource) -> Result<Self::Player>;
}

/// Position bookkeeping: where playback was at `anchored_at`.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    position: Duration,
    anchored_at: Instant,
}

/// A player without any media behind it, advancing with the monotonic clock.
#[derive(Debug)]
pub struct ClockPlayer {
    source: VideoSource,
    anchor: watch::Sender<Anchor>,
    status: watch::Sender<PlaybackStatus>,
}

impl ClockPlayer {
    #[must_use]
    pub fn new(source: VideoSource) -> Self {
        let anchor = Anchor {
            position: Duration::ZERO,
            anchored_at: Instant::now(),
        };
        Self {
            source,
            anchor: watch::Sender::new(anchor),
            status: watch::Sender::new(PlaybackStatus::Paused),
        }
    }

    fn current_position(&self, now: Instant) -> Duration {
        let anchor = *self.anchor.borrow();
        let position = if *self.status.borrow() == PlaybackStatus::Playing {
            anchor.position + now.saturating_duration_since(anchor.anchored_at)
        } else {
            anchor.position
        };
        match self.source.duration {
            Some(d) => position.min(d),
            None => position,
        }
    }

    /// Move the anchor without notifying anyone.
    fn set_anchor(&self, position: Duration, now: Instant) {
        self.anchor.send_if_modified(|a| {
            *a = Anchor {
                position,
                anchored_at: now,
            };
            false
        });
    }

    fn set_status(&self, status: PlaybackStatus) {
        self.status.send_if_modified(|s| {
            let changed = *s != status;
            *s = status;
            changed
        });
    }

    fn is_at_end(&self, position: Duration) -> bool {
        self.source.duration.is_some_and(|d| position >= d)
    }
}

impl PlaybackClock for ClockPlayer {
    fn position(&self) -> Result<Duration> {
        let now = Instant::now();
        let position = self.current_position(now);
        if *self.status.borrow() == PlaybackStatus::Playing && self.is_at_end(position) {
            tracing::info!(id = %self.source.id, "Playback reached the end of the track");
            self.set_anchor(position, now);
            self.set_status(PlaybackStatus::Stopped);
        }
        Ok(position)
    }
}

impl VideoPlayer for ClockPlayer {
    fn source(&self) -> &VideoSource {
        &self.source
    }

    fn play(&self) {
        let now = Instant::now();
        let mut position = self.current_position(now);
        if self.is_at_end(position) {
            position = Duration::ZERO;
        }
        self.set_anchor(position, now);
        self.set_status(PlaybackStatus::Playing);
    }

    fn pause(&self) {
        let now = Instant::now();
        self.set_anchor(self.current_position(now), now);
        if *self.status.borrow() == PlaybackStatus::Playing {
            self.set_status(PlaybackStatus::Paused);
        }
    }

    fn seek(&self, to: Duration) {
        let to = match self.source.duration {
            Some(d) => to.min(d),
            None => to,
        };
        self.set_anchor(to, Instant::now());
        if *self.status.borrow() == PlaybackStatus::Stopped && !self.is_at_end(to) {
            self.set_status(PlaybackStatus::Paused);
        }
    }

    fn status(&self) -> PlaybackStatus {
        *self.status.borrow()
    }

    fn status_changes(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.subscribe()
    }
}

/// Builds [`ClockPlayer`]s.
#[derive(Debug, Clone, Copy)]
pub struct ClockPlayerFactory {
    pub autoplay: bool,
}

impl PlayerFactory for ClockPlayerFactory {
    type Player = ClockPlayer;

    fn construct(&mut self, source: VideoSource) -> Result<ClockPlayer> {
        tracing::info!(
            id = %source.id,
            label = %source.label,
            autoplay = self.autoplay,
            "Creating player"
        );
        let player = ClockPlayer::new(source);
        if self.autoplay {
            player.play();
        }
        Ok(player)
    }
}
