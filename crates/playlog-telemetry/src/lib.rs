//! Play records and the tabular files they are persisted in

mod io;
mod paths;
mod types;

pub use io::{append_csv, atomic_write, ensure_csv, read_csv, read_csv_strict, write_csv};
pub use paths::Paths;
pub use types::{HistoryRecord, SummaryRecord, HISTORY_HEADER, SUMMARY_HEADER};
