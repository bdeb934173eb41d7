//! Play-change detection and durable play aggregation

mod config;
mod detector;
mod error;
mod ledger;
mod poller;
mod summary;
mod tracker;
mod types;

pub use config::Config;
pub use detector::{detect, Detection};
pub use error::{PlaylogError, Result};
pub use ledger::HistoryLedger;
pub use poller::{Poller, SnapshotSource, Tick};
pub use summary::SummaryTable;
pub use tracker::{Observation, Tracker};
pub use types::{PlaybackSnapshot, Track};

pub use playlog_telemetry::{HistoryRecord, Paths, SummaryRecord};
