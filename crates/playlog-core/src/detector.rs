//! Play-change detection
//!
//! A play is identified by its track id alone. Pausing, stopping and resuming
//! the same track, or replaying it right after it ends, is not a new play.

use crate::types::PlaybackSnapshot;
use chrono::{DateTime, Utc};

/// Outcome of comparing a snapshot with the last logged track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Same track as before, or playback is paused
    NoChange,
    /// A different track started playing
    NewPlay {
        track_id: String,
        started_at: DateTime<Utc>,
    },
    /// Nothing is playing; does not reset the previous track
    Stopped,
}

/// Decide whether `snapshot` starts a new play after `previous`.
///
/// `now` is used as the start time when the snapshot has no server timestamp.
pub fn detect(
    previous: Option<&str>,
    snapshot: Option<&PlaybackSnapshot>,
    now: DateTime<Utc>,
) -> Detection {
    let Some(snapshot) = snapshot else {
        return Detection::Stopped;
    };
    let Some(track) = &snapshot.track else {
        return Detection::Stopped;
    };

    if !snapshot.is_playing || previous == Some(track.id.as_str()) {
        return Detection::NoChange;
    }

    Detection::NewPlay {
        track_id: track.id.clone(),
        started_at: snapshot.estimated_started_at().unwrap_or(now),
    }
}
