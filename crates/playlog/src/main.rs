mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Optional .env next to the play files; real environment variables win
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run { interval: None }) {
        Commands::Run { interval } => commands::run::run(interval),
        Commands::History {
            limit,
            hours,
            track,
            stats,
        } => commands::history::run(limit, hours, track, stats),
        Commands::Summary { top } => commands::summary::run(top),
        Commands::Version => commands::version::run(),
    }
}
