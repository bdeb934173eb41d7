//! Fixed-interval poll loop

use crate::error::Result;
use crate::tracker::{Observation, Tracker};
use crate::types::PlaybackSnapshot;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can report what the listener is playing right now
pub trait SnapshotSource {
    type Error: Display;

    /// `Ok(None)` when nothing is playing
    fn current_playback(&mut self) -> std::result::Result<Option<PlaybackSnapshot>, Self::Error>;
}

/// Result of one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The source failed; nothing else changed
    FetchFailed(String),
    Observed(Observation),
}

/// Drives a [`SnapshotSource`] into a [`Tracker`], one poll per interval
pub struct Poller<S> {
    source: S,
    tracker: Tracker,
    interval: Duration,
}

impl<S: SnapshotSource> Poller<S> {
    pub fn new(source: S, tracker: Tracker, interval: Duration) -> Self {
        Self {
            source,
            tracker,
            interval,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Fetch one snapshot and feed it to the tracker.
    ///
    /// Fetch errors are logged and reported as [`Tick::FetchFailed`]; persistence
    /// errors propagate.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Tick> {
        let snapshot = match self.source.current_playback() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Snapshot fetch failed: {}", e);
                return Ok(Tick::FetchFailed(e.to_string()));
            }
        };

        let observation = self.tracker.observe(snapshot.as_ref(), now)?;
        match &observation {
            Observation::Logged { play, play_count } => info!(
                "Logged: {} - {} [{}] (count={})",
                play.track_name,
                play.artists,
                play.played_at.to_rfc3339(),
                play_count
            ),
            Observation::Unchanged => debug!("No change"),
            Observation::Stopped => debug!("Nothing playing"),
        }

        Ok(Tick::Observed(observation))
    }

    /// Poll forever, sleeping one interval after every tick, including failed ones.
    ///
    /// Returns only when persisting a play fails.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Starting tracker. Poll interval: {}s",
            self.interval.as_secs()
        );
        loop {
            self.tick(Utc::now())?;
            std::thread::sleep(self.interval);
        }
    }
}
