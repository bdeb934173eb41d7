//! Playback snapshot types

use chrono::{DateTime, Utc};

/// Descriptive metadata of the track in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
    pub album: String,
    pub duration_ms: Option<u64>,
}

impl Track {
    /// Artist names as stored in the play files
    pub fn artists_joined(&self) -> String {
        self.artists.join(", ")
    }
}

/// One observation of what the listener is playing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// `None` when the source reports no track item
    pub track: Option<Track>,
    pub is_playing: bool,
    /// Epoch milliseconds at which the source captured the snapshot
    pub server_timestamp: Option<i64>,
    pub progress_ms: Option<u64>,
}

impl PlaybackSnapshot {
    /// `server_timestamp - progress_ms`, with missing progress counted as 0
    pub fn estimated_start_ms(&self) -> Option<i64> {
        let progress = i64::try_from(self.progress_ms.unwrap_or(0)).unwrap_or(i64::MAX);
        self.server_timestamp
            .map(|timestamp| timestamp.saturating_sub(progress))
    }

    /// Best-effort start of the current play, if the snapshot carries enough to derive one
    pub fn estimated_started_at(&self) -> Option<DateTime<Utc>> {
        self.estimated_start_ms()
            .filter(|&ms| ms > 0)
            .and_then(DateTime::from_timestamp_millis)
    }
}
