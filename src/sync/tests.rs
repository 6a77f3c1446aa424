use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use anyhow::anyhow;
use tokio::time::timeout;

use super::*;
use crate::lrc::LyricEntry;

/// A clock set by hand. `None` means the player is not ready.
#[derive(Clone, Default)]
struct FakeClock(Rc<Cell<Option<Duration>>>);
impl FakeClock {
    fn set_ms(&self, ms: u64) {
        self.0.set(Some(Duration::from_millis(ms)));
    }
    fn fail(&self) {
        self.0.set(None);
    }
}
impl PlaybackClock for FakeClock {
    fn position(&self) -> Result<Duration> {
        self.0.get().ok_or_else(|| anyhow!("player not ready"))
    }
}

fn abc() -> Arc<Lyrics> {
    Arc::new(
        [
            LyricEntry::new(TimeTag::from_millis(0), "A"),
            LyricEntry::new(TimeTag::from_millis(1_000), "B"),
            LyricEntry::new(TimeTag::from_millis(2_000), "C"),
        ]
        .into_iter()
        .collect(),
    )
}

type Recorded = Rc<RefCell<Vec<String>>>;

fn recording_driver(lyrics: Arc<Lyrics>) -> (SyncDriver<FakeClock>, FakeClock, Recorded) {
    let clock = FakeClock::default();
    let mut driver = SyncDriver::new(clock.clone(), lyrics, DEFAULT_POLL_INTERVAL);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    driver.subscribe(Rc::new(move |l: &ActiveLyric| {
        sink.borrow_mut().push(l.as_str().to_owned());
    }));
    (driver, clock, seen)
}

#[tokio::test(start_paused = true)]
async fn notifies_only_on_change() {
    let (mut driver, clock, seen) = recording_driver(abc());
    driver.start();

    clock.set_ms(999);
    assert!(driver.tick());
    clock.set_ms(1_000);
    assert!(driver.tick());
    clock.set_ms(1_100);
    assert!(!driver.tick());
    clock.set_ms(1_900);
    assert!(!driver.tick());
    clock.set_ms(2_000);
    assert!(driver.tick());

    assert_eq!(*seen.borrow(), ["A", "B", "C"]);
    assert_eq!(driver.active().as_str(), "C");
}

#[tokio::test(start_paused = true)]
async fn empty_before_first_line() {
    let lyrics = Arc::new(Lyrics::parse("[00:01.00]First\n[00:02.00]Second"));
    let (mut driver, clock, seen) = recording_driver(lyrics);
    driver.start();

    clock.set_ms(0);
    assert!(!driver.tick());
    assert!(driver.active().is_empty());

    clock.set_ms(1_500);
    driver.tick();
    // Seeking back before the first line clears the display
    clock.set_ms(200);
    driver.tick();
    assert_eq!(*seen.borrow(), ["First", ""]);
}

#[tokio::test(start_paused = true)]
async fn unreadable_clock_skips_tick() {
    let (mut driver, clock, seen) = recording_driver(abc());
    driver.start();

    clock.fail();
    assert!(!driver.tick());
    clock.set_ms(1_200);
    assert!(driver.tick());
    clock.fail();
    assert!(!driver.tick());
    assert_eq!(driver.active().as_str(), "B");
    assert_eq!(*seen.borrow(), ["B"]);
}

#[tokio::test(start_paused = true)]
async fn tolerates_missing_lyrics() {
    let (mut driver, clock, seen) = recording_driver(Arc::new(Lyrics::default()));
    driver.start();
    clock.set_ms(5_000);
    assert!(!driver.tick());
    assert!(driver.active().is_empty());
    assert!(seen.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn idle_driver_does_not_tick() {
    let (mut driver, clock, seen) = recording_driver(abc());
    clock.set_ms(1_000);
    assert!(!driver.tick());
    assert!(seen.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn follows_playback_status() {
    let (mut driver, _, _) = recording_driver(abc());
    assert!(!driver.is_polling());
    driver.on_status(PlaybackStatus::Playing);
    assert!(driver.is_polling());
    driver.on_status(PlaybackStatus::Paused);
    assert!(!driver.is_polling());
    driver.on_status(PlaybackStatus::Playing);
    driver.on_status(PlaybackStatus::Stopped);
    assert!(!driver.is_polling());
}

#[tokio::test(start_paused = true)]
async fn ticks_on_fixed_period() {
    let (mut driver, clock, seen) = recording_driver(abc());
    clock.set_ms(0);
    driver.start();

    let started = tokio::time::Instant::now();
    driver.ticked().await;
    driver.tick();
    assert_eq!(started.elapsed(), Duration::ZERO);

    driver.ticked().await;
    assert_eq!(started.elapsed(), DEFAULT_POLL_INTERVAL);
    clock.set_ms(1_000);
    driver.tick();

    assert_eq!(*seen.borrow(), ["A", "B"]);
}

#[tokio::test(start_paused = true)]
async fn start_twice_keeps_timer() {
    let (mut driver, _, _) = recording_driver(abc());
    driver.start();
    driver.ticked().await;

    let started = tokio::time::Instant::now();
    driver.start();
    driver.ticked().await;
    assert_eq!(started.elapsed(), DEFAULT_POLL_INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_pending_tick() {
    let (mut driver, clock, seen) = recording_driver(abc());
    clock.set_ms(1_500);
    driver.start();

    // Let the deadline pass without consuming the tick
    tokio::time::advance(Duration::from_millis(250)).await;
    driver.stop();

    assert!(timeout(Duration::from_secs(5), driver.ticked()).await.is_err());
    assert!(!driver.tick());
    assert!(seen.borrow().is_empty());
}
