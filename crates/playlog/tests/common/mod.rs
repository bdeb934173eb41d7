#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use playlog_core::{PlaybackSnapshot, SnapshotSource, Track};
use std::collections::VecDeque;

pub type Fetch = Result<Option<PlaybackSnapshot>, String>;

/// Snapshot source replaying a fixed script, then reporting nothing playing
pub struct ScriptedSource {
    script: VecDeque<Fetch>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Fetch>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl SnapshotSource for ScriptedSource {
    type Error = String;

    fn current_playback(&mut self) -> Fetch {
        self.script.pop_front().unwrap_or(Ok(None))
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
}

/// Wall clock of the n-th poll at a 10 second interval
pub fn tick_time(n: i64) -> DateTime<Utc> {
    base_time() + chrono::Duration::seconds(10 * n)
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {id}"),
        artists: vec!["Band".to_string(), "Guest".to_string()],
        album: format!("Album {id}"),
        duration_ms: Some(180_000),
    }
}

/// Snapshot of `id` playing, captured at `captured_at` with `progress_ms` elapsed
pub fn playing(id: &str, progress_ms: u64, captured_at: DateTime<Utc>) -> PlaybackSnapshot {
    PlaybackSnapshot {
        track: Some(track(id)),
        is_playing: true,
        server_timestamp: Some(captured_at.timestamp_millis()),
        progress_ms: Some(progress_ms),
    }
}

pub fn paused(id: &str, progress_ms: u64, captured_at: DateTime<Utc>) -> PlaybackSnapshot {
    PlaybackSnapshot {
        is_playing: false,
        ..playing(id, progress_ms, captured_at)
    }
}
