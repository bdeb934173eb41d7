//! Tracker state: the last logged track plus the two play files

use crate::detector::{detect, Detection};
use crate::error::Result;
use crate::ledger::HistoryLedger;
use crate::summary::SummaryTable;
use crate::types::PlaybackSnapshot;
use chrono::{DateTime, Utc};
use playlog_telemetry::{ensure_csv, HistoryRecord, Paths, SUMMARY_HEADER};
use std::path::PathBuf;
use tracing::debug;

/// What one snapshot did to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// A new play was appended to the history and folded into the summary
    Logged { play: HistoryRecord, play_count: u32 },
    /// Same track as before, or paused
    Unchanged,
    /// Nothing playing
    Stopped,
}

impl Observation {
    pub fn is_logged(&self) -> bool {
        matches!(self, Observation::Logged { .. })
    }
}

/// Owns the in-memory summary and the detector's previous track for one run
#[derive(Debug)]
pub struct Tracker {
    ledger: HistoryLedger,
    summary: SummaryTable,
    summary_path: PathBuf,
    previous_track_id: Option<String>,
}

impl Tracker {
    /// Prepare both files, load the summary and seed the previous track from the
    /// last history record so a restart does not re-log the track still playing.
    pub fn open(paths: &Paths) -> Result<Self> {
        let ledger = HistoryLedger::open(&paths.history_file)?;
        ensure_csv(&paths.summary_file, SUMMARY_HEADER)?;
        let summary = SummaryTable::load(&paths.summary_file)?;
        let previous_track_id = ledger.last_track_id()?;

        debug!(
            tracks = summary.len(),
            previous = previous_track_id.as_deref().unwrap_or("<none>"),
            "Loaded play files"
        );

        Ok(Self {
            ledger,
            summary,
            summary_path: paths.summary_file.clone(),
            previous_track_id,
        })
    }

    pub fn previous_track_id(&self) -> Option<&str> {
        self.previous_track_id.as_deref()
    }

    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Run detection on `snapshot` and persist a new play if one started.
    ///
    /// The history row is appended before the summary is rewritten.
    pub fn observe(
        &mut self,
        snapshot: Option<&PlaybackSnapshot>,
        now: DateTime<Utc>,
    ) -> Result<Observation> {
        let detection = detect(self.previous_track_id.as_deref(), snapshot, now);

        let (track_id, started_at) = match detection {
            Detection::NoChange => return Ok(Observation::Unchanged),
            Detection::Stopped => return Ok(Observation::Stopped),
            Detection::NewPlay {
                track_id,
                started_at,
            } => (track_id, started_at),
        };

        let Some(track) = snapshot.and_then(|s| s.track.as_ref()) else {
            return Ok(Observation::Stopped);
        };

        let play = HistoryRecord {
            played_at: started_at,
            track_id,
            track_name: track.name.clone(),
            artists: track.artists_joined(),
            album: track.album.clone(),
            duration_ms: track.duration_ms.unwrap_or(0),
        };

        self.ledger.append(&play)?;
        let play_count = self.summary.upsert(&play).play_count;
        self.summary.save(&self.summary_path)?;
        self.previous_track_id = Some(play.track_id.clone());

        Ok(Observation::Logged { play, play_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Track;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    fn playing(id: &str) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track: Some(Track {
                id: id.to_string(),
                name: format!("Song {id}"),
                artists: vec!["First".to_string(), "Second".to_string()],
                album: "Album".to_string(),
                duration_ms: Some(200_000),
            }),
            is_playing: true,
            server_timestamp: Some(now().timestamp_millis()),
            progress_ms: Some(20_000),
        }
    }

    #[test]
    fn test_open_creates_both_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());

        let tracker = Tracker::open(&paths).unwrap();
        assert!(paths.history_file.exists());
        assert!(paths.summary_file.exists());
        assert_eq!(tracker.previous_track_id(), None);
        assert!(tracker.summary().is_empty());
    }

    #[test]
    fn test_new_play_writes_history_and_summary() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());
        let mut tracker = Tracker::open(&paths).unwrap();

        let observation = tracker.observe(Some(&playing("a")), now()).unwrap();
        let Observation::Logged { play, play_count } = observation else {
            panic!("expected a logged play, got {observation:?}");
        };
        assert_eq!(play_count, 1);
        assert_eq!(play.played_at, now() - chrono::Duration::seconds(20));
        assert_eq!(play.artists, "First, Second");
        assert_eq!(tracker.previous_track_id(), Some("a"));

        assert_eq!(tracker.ledger().records().unwrap(), vec![play]);
        let stored = SummaryTable::load(&paths.summary_file).unwrap();
        assert_eq!(stored.get("a").unwrap().play_count, 1);
    }

    #[test]
    fn test_unchanged_and_stopped_write_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());
        let mut tracker = Tracker::open(&paths).unwrap();
        tracker.observe(Some(&playing("a")), now()).unwrap();
        let history_before = std::fs::read_to_string(&paths.history_file).unwrap();
        let summary_before = std::fs::read_to_string(&paths.summary_file).unwrap();

        assert_eq!(
            tracker.observe(Some(&playing("a")), now()).unwrap(),
            Observation::Unchanged
        );
        assert_eq!(tracker.observe(None, now()).unwrap(), Observation::Stopped);

        assert_eq!(
            std::fs::read_to_string(&paths.history_file).unwrap(),
            history_before
        );
        assert_eq!(
            std::fs::read_to_string(&paths.summary_file).unwrap(),
            summary_before
        );
    }

    #[test]
    fn test_missing_duration_is_logged_as_zero() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut tracker = Tracker::open(&Paths::in_dir(temp.path())).unwrap();

        let mut snap = playing("a");
        snap.track.as_mut().unwrap().duration_ms = None;
        snap.progress_ms = None;

        let observation = tracker.observe(Some(&snap), now()).unwrap();
        let Observation::Logged { play, .. } = observation else {
            panic!("expected a logged play");
        };
        assert_eq!(play.duration_ms, 0);
        assert_eq!(play.played_at, now());
    }

    #[test]
    fn test_open_seeds_previous_from_last_history_record() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());
        {
            let mut tracker = Tracker::open(&paths).unwrap();
            tracker.observe(Some(&playing("a")), now()).unwrap();
            tracker.observe(Some(&playing("b")), now()).unwrap();
        }

        let tracker = Tracker::open(&paths).unwrap();
        assert_eq!(tracker.previous_track_id(), Some("b"));
        assert_eq!(tracker.summary().len(), 2);
    }
}
