//! Blocking client for the currently-playing endpoint

use crate::auth::{Credentials, TokenCache};
use crate::error::SpotifyError;
use crate::model::CurrentlyPlaying;
use chrono::Utc;
use playlog_core::{PlaybackSnapshot, SnapshotSource};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tracing::debug;

const API_BASE: &str = "https://api.spotify.com";
const ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

/// Base URLs of the Web API and the accounts service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub accounts_base: String,
}

impl Endpoints {
    pub fn new(api_base: &str, accounts_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            accounts_base: accounts_base.trim_end_matches('/').to_string(),
        }
    }

    fn currently_playing_url(&self) -> String {
        format!("{}/v1/me/player/currently-playing", self.api_base)
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(API_BASE, ACCOUNTS_BASE)
    }
}

/// Blocking client for the listener's currently playing track
pub struct SpotifyClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    cache_path: PathBuf,
    token: TokenCache,
    endpoints: Endpoints,
}

impl SpotifyClient {
    /// Load the cached token from `cache_path`. Fails if the cache does not exist.
    pub fn new(credentials: Credentials, cache_path: &Path) -> Result<Self, SpotifyError> {
        Self::with_endpoints(credentials, cache_path, Endpoints::default())
    }

    pub fn with_endpoints(
        credentials: Credentials,
        cache_path: &Path,
        endpoints: Endpoints,
    ) -> Result<Self, SpotifyError> {
        let token = TokenCache::load(cache_path)?;
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("playlog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            credentials,
            cache_path: cache_path.to_path_buf(),
            token,
            endpoints,
        })
    }

    fn access_token(&mut self) -> Result<String, SpotifyError> {
        let now = Utc::now();
        if self.token.is_expired(now) {
            let token_url = self.endpoints.token_url();
            self.token.refresh(&self.http, &token_url, &self.credentials, now)?;
            self.token.save(&self.cache_path)?;
            debug!(expires_at = self.token.expires_at, "Refreshed access token");
        }
        Ok(self.token.access_token.clone())
    }

    /// `Ok(None)` when Spotify reports no active playback
    pub fn currently_playing(&mut self) -> Result<Option<PlaybackSnapshot>, SpotifyError> {
        let token = self.access_token()?;
        let response = self
            .http
            .get(self.endpoints.currently_playing_url())
            .bearer_auth(token)
            .send()?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.token.mark_expired();
            }
            return Err(SpotifyError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let playing: CurrentlyPlaying = serde_json::from_str(&body)?;
        Ok(Some(playing.into_snapshot()))
    }
}

impl SnapshotSource for SpotifyClient {
    type Error = SpotifyError;

    fn current_playback(&mut self) -> Result<Option<PlaybackSnapshot>, SpotifyError> {
        self.currently_playing()
    }
}
