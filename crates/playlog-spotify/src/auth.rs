//! Client credentials and the cached OAuth token

use crate::error::SpotifyError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CLIENT_ID: &str = "SPOTIPY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIPY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIPY_REDIRECT_URI";

/// Refresh this many seconds before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Spotify application credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, SpotifyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// All three variables are required; the error names every missing one
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SpotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let credentials = Self {
            client_id: require(ENV_CLIENT_ID),
            client_secret: require(ENV_CLIENT_SECRET),
            redirect_uri: require(ENV_REDIRECT_URI),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(SpotifyError::MissingCredentials(missing))
        }
    }
}

/// OAuth token as stored in the cache file (same layout spotipy writes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCache {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    /// Epoch seconds
    #[serde(default)]
    pub expires_at: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    expires_in: i64,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenCache {
    pub fn load(path: &Path) -> Result<Self, SpotifyError> {
        if !path.exists() {
            return Err(SpotifyError::TokenCache(format!(
                "no cached token at {}; authorize the application once to create it",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let cache: TokenCache = serde_json::from_str(&contents)?;
        Ok(cache)
    }

    pub fn save(&self, path: &Path) -> Result<(), SpotifyError> {
        let json = serde_json::to_string(self)?;
        playlog_telemetry::atomic_write(path, json.as_bytes())?;
        Ok(())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now.timestamp() < EXPIRY_MARGIN_SECS
    }

    /// Force a refresh before the next request
    pub fn mark_expired(&mut self) {
        self.expires_at = 0;
    }

    fn apply(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.access_token = response.access_token;
        if let Some(token_type) = response.token_type {
            self.token_type = token_type;
        }
        self.expires_in = response.expires_in;
        self.expires_at = now.timestamp() + response.expires_in;
        if let Some(scope) = response.scope {
            self.scope = scope;
        }
        // Spotify may omit the refresh token; the old one stays valid
        if response.refresh_token.is_some() {
            self.refresh_token = response.refresh_token;
        }
    }

    /// Exchange the refresh token for a new access token at `token_url`
    pub fn refresh(
        &mut self,
        http: &reqwest::blocking::Client,
        token_url: &str,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<(), SpotifyError> {
        let refresh_token = self.refresh_token.clone().ok_or_else(|| {
            SpotifyError::TokenCache("cached token has no refresh_token".to_string())
        })?;

        let response = http
            .post(token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpotifyError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let token: TokenResponse = response.json()?;
        self.apply(token, now);
        Ok(())
    }
}
