use playlog_core::{Config, Poller, Tracker};
use playlog_spotify::{Credentials, SpotifyClient};

pub fn run(interval: Option<u64>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(secs) = interval {
        config = config.with_interval_secs(secs)?;
    }

    // Credentials and the token cache are checked before any file is touched
    let credentials = Credentials::from_env()?;
    let source = SpotifyClient::new(credentials, &config.paths.credential_cache)?;

    let tracker = Tracker::open(&config.paths)?;
    let mut poller = Poller::new(source, tracker, config.poll_interval);
    poller.run()?;
    Ok(())
}
