//! Keeps the displayed lyric in step with a playback clock.

#[cfg(test)]
mod tests;

use std::{fmt, future::pending, rc::Rc, sync::Arc, time::Duration};

use anyhow::Result;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::{
    lrc::{Lyrics, TimeTag},
    player::PlaybackStatus,
};

/// Default period between two lyric lookups, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
#[cfg(test)]
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// Anything that can report how far into the track playback is.
pub trait PlaybackClock {
    /// Current playback position.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not ready or the position cannot be read.
    fn position(&self) -> Result<Duration>;
}

impl<T: PlaybackClock + ?Sized> PlaybackClock for Arc<T> {
    fn position(&self) -> Result<Duration> {
        (**self).position()
    }
}

/// The lyric line that should currently be displayed. Empty before the first line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLyric(String);

impl ActiveLyric {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ActiveLyric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Callback invoked whenever the active lyric changes.
pub type Listener = Rc<dyn Fn(&ActiveLyric)>;

/// Polls a [`PlaybackClock`] and publishes the active lyric whenever it changes.
///
/// The timer lives inside the driver and is only polled through [`SyncDriver::ticked`], so
/// [`SyncDriver::stop`] takes effect before any further tick can be observed.
pub struct SyncDriver<C> {
    clock: C,
    lyrics: Arc<Lyrics>,
    period: Duration,
    timer: Option<Interval>,
    published: ActiveLyric,
    listeners: Vec<Listener>,
}

impl<C: PlaybackClock> SyncDriver<C> {
    pub fn new(clock: C, lyrics: Arc<Lyrics>, period: Duration) -> Self {
        Self {
            clock,
            lyrics,
            period,
            timer: None,
            published: ActiveLyric::default(),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Start polling. Does nothing if the driver is already polling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }
        tracing::debug!(period = ?self.period, lines = self.lyrics.len(), "Lyric sync started");
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.timer = Some(timer);
    }

    /// Stop polling. Pending ticks are discarded.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!("Lyric sync stopped");
        }
    }

    #[must_use]
    pub const fn is_polling(&self) -> bool {
        self.timer.is_some()
    }

    /// Follow the playback status of the player.
    pub fn on_status(&mut self, status: PlaybackStatus) {
        match status {
            PlaybackStatus::Playing => self.start(),
            PlaybackStatus::Paused | PlaybackStatus::Stopped => self.stop(),
        }
    }

    /// Wait for the next timer tick. Never completes while the driver is idle.
    ///
    /// Cancel safe.
    pub async fn ticked(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => pending().await,
        }
    }

    /// Look up the active lyric and notify listeners if it changed.
    ///
    /// Returns whether listeners were notified. Idle drivers and unreadable clocks are no-ops.
    pub fn tick(&mut self) -> bool {
        if self.timer.is_none() {
            return false;
        }
        let position = match self.clock.position() {
            Ok(p) => TimeTag::from(p),
            Err(e) => {
                tracing::trace!(?e, "Playback position unavailable, skipping tick");
                return false;
            }
        };
        let candidate = self
            .lyrics
            .active_at(position)
            .map(|e| e.text.as_str())
            .unwrap_or_default();
        if candidate == self.published.as_str() {
            return false;
        }

        tracing::debug!(?position, lyric = candidate, "Active lyric changed");
        self.published = ActiveLyric(candidate.to_owned());
        for listener in &self.listeners {
            listener(&self.published);
        }
        true
    }

    #[must_use]
    pub const fn active(&self) -> &ActiveLyric {
        &self.published
    }

    #[must_use]
    pub fn lyrics(&self) -> &Lyrics {
        &self.lyrics
    }
}
