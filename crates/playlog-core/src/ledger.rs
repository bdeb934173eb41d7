//! Append-only play history

use playlog_telemetry::{append_csv, ensure_csv, read_csv, HistoryRecord, HISTORY_HEADER};
use std::path::{Path, PathBuf};

/// The history file, in detection order. Records are only ever appended.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    path: PathBuf,
}

impl HistoryLedger {
    /// Open the ledger at `path`, creating it with a header row if missing
    pub fn open(path: &Path) -> std::io::Result<Self> {
        ensure_csv(path, HISTORY_HEADER)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn append(&self, record: &HistoryRecord) -> std::io::Result<()> {
        append_csv(&self.path, HISTORY_HEADER, record)
    }

    /// All readable records, oldest first
    pub fn records(&self) -> std::io::Result<Vec<HistoryRecord>> {
        read_csv(&self.path)
    }

    /// Track id of the most recently appended record
    pub fn last_track_id(&self) -> std::io::Result<Option<String>> {
        Ok(self.records()?.pop().map(|record| record.track_id))
    }
}
