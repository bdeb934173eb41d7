//! Play record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the history file
pub const HISTORY_HEADER: &[&str] = &[
    "played_at",
    "track_id",
    "track_name",
    "artists",
    "album",
    "duration_ms",
];

/// Column order of the summary file
pub const SUMMARY_HEADER: &[&str] = &[
    "track_id",
    "track_name",
    "artists",
    "album",
    "duration_ms",
    "first_played",
    "last_played",
    "play_count",
];

/// RFC 3339 timestamps with an explicit `+00:00` offset.
///
/// Any RFC 3339 offset is accepted on read and normalised to UTC.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// One detected play, appended to the history file and never rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(with = "iso8601")]
    pub played_at: DateTime<Utc>,
    pub track_id: String,
    pub track_name: String,
    /// Artist names joined with ", "
    pub artists: String,
    pub album: String,
    pub duration_ms: u64,
}

/// Aggregate of every detected play of one track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub track_id: String,
    pub track_name: String,
    pub artists: String,
    pub album: String,
    pub duration_ms: u64,
    #[serde(with = "iso8601")]
    pub first_played: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub last_played: DateTime<Utc>,
    pub play_count: u32,
}

impl SummaryRecord {
    /// Start a summary from the first play of a track
    pub fn from_first_play(play: &HistoryRecord) -> Self {
        Self {
            track_id: play.track_id.clone(),
            track_name: play.track_name.clone(),
            artists: play.artists.clone(),
            album: play.album.clone(),
            duration_ms: play.duration_ms,
            first_played: play.played_at,
            last_played: play.played_at,
            play_count: 1,
        }
    }
}
