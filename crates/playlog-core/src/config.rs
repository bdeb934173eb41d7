//! Configuration for the play tracker

use crate::error::{PlaylogError, Result};
use playlog_telemetry::Paths;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

pub const ENV_POLL_INTERVAL: &str = "SPOTIFY_POLL_INTERVAL";
pub const ENV_SUMMARY_CSV: &str = "SPOTIFY_SUMMARY_CSV";
pub const ENV_HISTORY_CSV: &str = "SPOTIFY_HISTORY_CSV";
pub const ENV_CACHE_PATH: &str = "SPOTIFY_CACHE_PATH";

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Wait between snapshot fetches
    pub poll_interval: Duration,

    /// History, summary and token cache locations
    pub paths: Paths,
}

impl Config {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            paths: Paths::new(),
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or empty values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(raw) = get(ENV_POLL_INTERVAL) {
            config.poll_interval = parse_interval(&raw)?;
        }
        if let Some(path) = get(ENV_SUMMARY_CSV) {
            config.paths.summary_file = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_HISTORY_CSV) {
            config.paths.history_file = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_CACHE_PATH) {
            config.paths.credential_cache = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Replace the poll interval, rejecting zero
    pub fn with_interval_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(PlaylogError::Config(
                "poll interval must be at least 1 second".to_string(),
            ));
        }
        self.poll_interval = Duration::from_secs(secs);
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_interval(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        PlaylogError::Config(format!(
            "{ENV_POLL_INTERVAL} must be a whole number of seconds, got {raw:?}"
        ))
    })?;
    if secs == 0 {
        return Err(PlaylogError::Config(format!(
            "{ENV_POLL_INTERVAL} must be at least 1"
        )));
    }
    Ok(Duration::from_secs(secs))
}
