//! Owns the player and lyric driver of the track currently on screen.

use std::{future::pending, rc::Rc, sync::Arc, time::Duration};

use anyhow::{Context as _, Result};
use tokio::{select, sync::watch};

use crate::{
    lrc::Lyrics,
    player::{PlaybackStatus, PlayerFactory, VideoPlayer, VideoSource},
    sync::{Listener, SyncDriver},
};

/// Something the event loop has to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Status(PlaybackStatus),
    /// The driver timer fired; call [`Session::tick`].
    Tick,
}

struct Loaded<P> {
    player: Arc<P>,
    driver: SyncDriver<Arc<P>>,
    status: watch::Receiver<PlaybackStatus>,
}

pub struct Session<F: PlayerFactory> {
    factory: F,
    period: Duration,
    listeners: Vec<Listener>,
    current: Option<Loaded<F::Player>>,
}

impl<F: PlayerFactory> Session<F> {
    pub fn new(factory: F, period: Duration) -> Self {
        Self {
            factory,
            period,
            listeners: Vec::new(),
            current: None,
        }
    }

    /// Register a listener for every driver this session creates, including the current one.
    pub fn subscribe(&mut self, listener: Listener) {
        if let Some(loaded) = self.current.as_mut() {
            loaded.driver.subscribe(Rc::clone(&listener));
        }
        self.listeners.push(listener);
    }

    /// Stop the current driver and release the current player.
    pub fn teardown(&mut self) {
        let Some(mut loaded) = self.current.take() else {
            return;
        };
        tracing::info!(id = %loaded.player.source().id, "Tearing down player");
        loaded.driver.stop();
        drop(loaded);
    }

    /// Replace the current track. The old player is gone before the new one is constructed.
    ///
    /// # Errors
    ///
    /// Returns an error if the factory fails to build the new player. The session is then empty.
    pub fn replace(&mut self, source: VideoSource, lyrics: Lyrics) -> Result<()> {
        self.teardown();

        let id = source.id.clone();
        let player = Arc::new(
            self.factory
                .construct(source)
                .with_context(|| format!("Failed to create player for {id}"))?,
        );
        let status = player.status_changes();
        let mut driver = SyncDriver::new(Arc::clone(&player), Arc::new(lyrics), self.period);
        for listener in &self.listeners {
            driver.subscribe(Rc::clone(listener));
        }
        driver.on_status(player.status());
        tracing::info!(
            %id,
            status = %player.status(),
            lines = driver.lyrics().len(),
            "Player ready"
        );

        self.current = Some(Loaded {
            player,
            driver,
            status,
        });
        Ok(())
    }

    #[must_use]
    pub fn player(&self) -> Option<&F::Player> {
        self.current.as_ref().map(|l| l.player.as_ref())
    }

    #[must_use]
    pub fn driver(&self) -> Option<&SyncDriver<Arc<F::Player>>> {
        self.current.as_ref().map(|l| &l.driver)
    }

    /// Wait for the next status change or driver tick of the current track.
    ///
    /// Never completes without a track. Cancel safe.
    pub async fn next_event(&mut self) -> SessionEvent {
        let Some(loaded) = self.current.as_mut() else {
            return pending().await;
        };
        select! {
            Ok(()) = loaded.status.changed() => {
                SessionEvent::Status(*loaded.status.borrow_and_update())
            }
            () = loaded.driver.ticked() => SessionEvent::Tick,
        }
    }

    pub fn on_status(&mut self, status: PlaybackStatus) {
        if let Some(loaded) = self.current.as_mut() {
            loaded.driver.on_status(status);
        }
    }

    pub fn tick(&mut self) -> bool {
        self.current.as_mut().is_some_and(|l| l.driver.tick())
    }
}
