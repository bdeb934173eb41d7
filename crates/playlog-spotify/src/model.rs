//! Wire types for `GET /v1/me/player/currently-playing`

use playlog_core::{PlaybackSnapshot, Track};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    /// Epoch milliseconds at which Spotify captured this state
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub is_playing: bool,
    /// `null` for ads, episodes and unknown items
    #[serde(default)]
    pub item: Option<Item>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    /// `null` for local files
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<NamedObject>,
    #[serde(default)]
    pub album: Option<NamedObject>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedObject {
    #[serde(default)]
    pub name: Option<String>,
}

impl CurrentlyPlaying {
    pub fn into_snapshot(self) -> PlaybackSnapshot {
        let track = self.item.and_then(|item| {
            let id = item.id.filter(|id| !id.is_empty())?;
            Some(Track {
                id,
                name: item.name.unwrap_or_default(),
                artists: item
                    .artists
                    .into_iter()
                    .filter_map(|artist| artist.name)
                    .filter(|name| !name.is_empty())
                    .collect(),
                album: item.album.and_then(|album| album.name).unwrap_or_default(),
                duration_ms: item.duration_ms,
            })
        });

        PlaybackSnapshot {
            track,
            is_playing: self.is_playing,
            server_timestamp: self.timestamp,
            progress_ms: self.progress_ms,
        }
    }
}
