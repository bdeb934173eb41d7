use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "playlog")]
#[command(version)]
#[command(about = "Spotify play history tracker")]
pub struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll Spotify and log plays until interrupted
    Run {
        /// Poll interval in seconds (overrides SPOTIFY_POLL_INTERVAL)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// View play history
    History {
        /// Number of most recent plays to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Only plays from the last N hours
        #[arg(long)]
        hours: Option<u64>,

        /// Only plays of this track id
        #[arg(long)]
        track: Option<String>,

        /// Show statistics summary
        #[arg(long)]
        stats: bool,
    },

    /// Show most played tracks
    Summary {
        /// Number of tracks to show
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },

    /// Print version information
    Version,
}
