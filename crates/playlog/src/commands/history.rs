use std::collections::HashSet;

use playlog_core::Config;
use playlog_telemetry::{read_csv, HistoryRecord};

#[derive(Default)]
struct HistoryFilter {
    track: Option<String>,
    hours: Option<u64>,
}

fn filter_plays<'a>(plays: &'a [HistoryRecord], filter: &HistoryFilter) -> Vec<&'a HistoryRecord> {
    // A window reaching past the representable range means no cutoff
    let cutoff = filter.hours.and_then(|h| {
        let window = chrono::Duration::try_hours(i64::try_from(h).ok()?)?;
        chrono::Utc::now().checked_sub_signed(window)
    });

    plays
        .iter()
        .filter(|p| {
            if let Some(ref cutoff) = cutoff {
                if p.played_at < *cutoff {
                    return false;
                }
            }
            if let Some(ref track) = filter.track {
                if &p.track_id != track {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn format_duration(total_ms: u64) -> String {
    let minutes = total_ms / 60_000;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn compute_stats(plays: &[&HistoryRecord]) -> String {
    let (Some(first), Some(last)) = (plays.first(), plays.last()) else {
        return "No plays to analyze.".to_string();
    };
    let distinct: HashSet<&str> = plays.iter().map(|p| p.track_id.as_str()).collect();
    let listened_ms: u64 = plays.iter().map(|p| p.duration_ms).sum();

    format!(
        "Total plays: {}\n\
         Distinct tracks: {}\n\
         Listening time: {}\n\
         First play: {}\n\
         Last play: {}",
        plays.len(),
        distinct.len(),
        format_duration(listened_ms),
        first.played_at.format("%Y-%m-%d %H:%M"),
        last.played_at.format("%Y-%m-%d %H:%M"),
    )
}

pub fn run(
    limit: usize,
    hours: Option<u64>,
    track: Option<String>,
    stats: bool,
) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let plays: Vec<HistoryRecord> = read_csv(&config.paths.history_file)?;

    if plays.is_empty() {
        println!("No play history");
        return Ok(());
    }

    let filter = HistoryFilter { track, hours };
    let filtered = filter_plays(&plays, &filter);

    if stats {
        println!("{}", compute_stats(&filtered));
        return Ok(());
    }

    let display_plays: Vec<_> = filtered.into_iter().rev().take(limit).collect();

    println!("Recent Plays (last {})", display_plays.len());
    println!("======================");
    for play in &display_plays {
        println!(
            "  {} | {} - {} ({})",
            play.played_at.format("%Y-%m-%d %H:%M"),
            play.track_name,
            play.artists,
            play.album,
        );
    }
    Ok(())
}
