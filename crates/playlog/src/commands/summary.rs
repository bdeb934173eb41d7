use playlog_core::{Config, SummaryTable};
use playlog_telemetry::SummaryRecord;

fn format_row(rank: usize, record: &SummaryRecord) -> String {
    format!(
        "{:>3}. {:>4}x  {} - {}  (last {})",
        rank,
        record.play_count,
        record.track_name,
        record.artists,
        record.last_played.format("%Y-%m-%d %H:%M"),
    )
}

pub fn run(top: usize) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let table = SummaryTable::load(&config.paths.summary_file)?;

    if table.is_empty() {
        println!("No tracks logged yet");
        return Ok(());
    }

    let total: u64 = table.iter().map(|r| u64::from(r.play_count)).sum();
    println!("Top Tracks ({} distinct, {} plays)", table.len(), total);
    println!("======================");
    for (i, record) in table.ranked().into_iter().take(top).enumerate() {
        println!("{}", format_row(i + 1, record));
    }
    Ok(())
}
