pub fn run() -> anyhow::Result<()> {
    println!("playlog {}", env!("CARGO_PKG_VERSION"));
    println!("Logs Spotify plays to a history ledger and a per-track summary");
    Ok(())
}
