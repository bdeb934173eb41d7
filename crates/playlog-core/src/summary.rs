//! Per-track play aggregate

use playlog_telemetry::{read_csv_strict, write_csv, HistoryRecord, SummaryRecord, SUMMARY_HEADER};
use std::collections::HashMap;
use std::path::Path;

/// One [`SummaryRecord`] per track id, kept in first-played order
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    records: Vec<SummaryRecord>,
    index: HashMap<String, usize>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from stored rows; a later row for the same track replaces an earlier one
    pub fn from_records(records: impl IntoIterator<Item = SummaryRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            match table.index.get(&record.track_id) {
                Some(&pos) => table.records[pos] = record,
                None => {
                    table.index.insert(record.track_id.clone(), table.records.len());
                    table.records.push(record);
                }
            }
        }
        table
    }

    /// Load the summary file. Malformed rows are an error, since the file is rewritten wholesale.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let records: Vec<SummaryRecord> = read_csv_strict(path)?;
        Ok(Self::from_records(records))
    }

    /// Rewrite the summary file with the full table
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        write_csv(path, SUMMARY_HEADER, &self.records)
    }

    /// Fold one detected play into the table and return the updated record
    pub fn upsert(&mut self, play: &HistoryRecord) -> &SummaryRecord {
        let pos = match self.index.get(&play.track_id) {
            Some(&pos) => {
                let record = &mut self.records[pos];
                record.play_count = record.play_count.saturating_add(1);
                record.last_played = play.played_at;
                // In detection order first_played never moves. It is lowered only
                // when an estimated start predates the stored one (clock skew);
                // first_played <= last_played takes precedence there.
                record.first_played = record.first_played.min(play.played_at);
                record.track_name.clone_from(&play.track_name);
                record.artists.clone_from(&play.artists);
                record.album.clone_from(&play.album);
                record.duration_ms = play.duration_ms;
                pos
            }
            None => {
                let pos = self.records.len();
                self.index.insert(play.track_id.clone(), pos);
                self.records.push(SummaryRecord::from_first_play(play));
                pos
            }
        };
        &self.records[pos]
    }

    pub fn get(&self, track_id: &str) -> Option<&SummaryRecord> {
        self.index.get(track_id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SummaryRecord> {
        self.records.iter()
    }

    /// Records by play count, most played first; ties go to the most recently played
    pub fn ranked(&self) -> Vec<&SummaryRecord> {
        let mut ranked: Vec<&SummaryRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| {
            b.play_count
                .cmp(&a.play_count)
                .then_with(|| b.last_played.cmp(&a.last_played))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, minute, 0).unwrap()
    }

    fn play(track_id: &str, name: &str, minute: u32) -> HistoryRecord {
        HistoryRecord {
            played_at: at(minute),
            track_id: track_id.to_string(),
            track_name: name.to_string(),
            artists: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 200_000,
        }
    }

    #[test]
    fn test_first_play_creates_record() {
        let mut table = SummaryTable::new();
        let record = table.upsert(&play("a", "Song A", 0)).clone();

        assert_eq!(record.play_count, 1);
        assert_eq!(record.first_played, at(0));
        assert_eq!(record.last_played, at(0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_repeated_plays_count_and_keep_first_played() {
        let mut table = SummaryTable::new();
        for minute in [0, 5, 10, 15] {
            table.upsert(&play("a", "Song A", minute));
        }

        let record = table.get("a").unwrap();
        assert_eq!(record.play_count, 4);
        assert_eq!(record.first_played, at(0));
        assert_eq!(record.last_played, at(15));
    }

    #[test]
    fn test_metadata_is_overwritten_by_latest_play() {
        let mut table = SummaryTable::new();
        table.upsert(&play("a", "Song A", 0));

        let mut corrected = play("a", "Song A (Remastered)", 4);
        corrected.album = "Deluxe".to_string();
        corrected.duration_ms = 201_000;
        let record = table.upsert(&corrected);

        assert_eq!(record.track_name, "Song A (Remastered)");
        assert_eq!(record.album, "Deluxe");
        assert_eq!(record.duration_ms, 201_000);
        assert_eq!(record.play_count, 2);
    }

    #[test]
    fn test_tracks_are_kept_separate_in_first_played_order() {
        let mut table = SummaryTable::new();
        table.upsert(&play("b", "Song B", 0));
        table.upsert(&play("a", "Song A", 1));
        table.upsert(&play("b", "Song B", 2));

        let ids: Vec<&str> = table.iter().map(|r| r.track_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(table.get("a").unwrap().play_count, 1);
        assert_eq!(table.get("b").unwrap().play_count, 2);
    }

    #[test]
    fn test_out_of_order_play_keeps_invariant() {
        let mut table = SummaryTable::new();
        table.upsert(&play("a", "Song A", 10));
        let record = table.upsert(&play("a", "Song A", 3));

        assert!(record.first_played <= record.last_played);
        assert_eq!(record.first_played, at(3));
        assert_eq!(record.last_played, at(3));
        assert_eq!(record.play_count, 2);
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("summary.csv");

        let mut table = SummaryTable::new();
        table.upsert(&play("a", "Song A", 0));
        table.upsert(&play("b", "Song, With Comma", 1));
        table.upsert(&play("a", "Song A", 2));
        table.save(&path).unwrap();

        let loaded = SummaryTable::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("a"), table.get("a"));
        assert_eq!(loaded.get("b").unwrap().track_name, "Song, With Comma");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let table = SummaryTable::load(&temp.path().join("absent.csv")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_rows() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("summary.csv");
        std::fs::write(
            &path,
            "track_id,track_name,artists,album,duration_ms,first_played,last_played,play_count\n\
             a,Song,Artist,Album,1000,not-a-date,2024-01-01T00:00:00+00:00,1\n",
        )
        .unwrap();

        assert!(SummaryTable::load(&path).is_err());
    }

    #[test]
    fn test_duplicate_rows_last_wins() {
        let first = SummaryRecord::from_first_play(&play("a", "Old", 0));
        let mut second = SummaryRecord::from_first_play(&play("a", "New", 1));
        second.play_count = 7;

        let table = SummaryTable::from_records(vec![first, second]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().play_count, 7);
    }

    #[test]
    fn test_ranked() {
        let mut table = SummaryTable::new();
        table.upsert(&play("a", "Song A", 0));
        table.upsert(&play("b", "Song B", 1));
        table.upsert(&play("b", "Song B", 2));
        table.upsert(&play("c", "Song C", 3));

        let ids: Vec<&str> = table.ranked().iter().map(|r| r.track_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
