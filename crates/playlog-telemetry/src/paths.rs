//! Path resolution for play log files

use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_FILE: &str = "spotify_history.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "spotify_summary.csv";
pub const DEFAULT_CREDENTIAL_CACHE: &str = ".spotify_cache";

/// Locations of the files the tracker reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Append-only play history
    pub history_file: PathBuf,
    /// Per-track aggregate, rewritten after every play
    pub summary_file: PathBuf,
    /// OAuth token cache owned by the snapshot source
    pub credential_cache: PathBuf,
}

impl Paths {
    /// Default file names, relative to the working directory
    pub fn new() -> Self {
        Self {
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
            credential_cache: PathBuf::from(DEFAULT_CREDENTIAL_CACHE),
        }
    }

    /// Default file names placed under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            history_file: dir.join(DEFAULT_HISTORY_FILE),
            summary_file: dir.join(DEFAULT_SUMMARY_FILE),
            credential_cache: dir.join(DEFAULT_CREDENTIAL_CACHE),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
