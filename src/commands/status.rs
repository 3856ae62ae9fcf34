use crate::models::BuildConfig;
use crate::services::{self, SnapshotCatalog};
use std::path::PathBuf;

pub fn run(data_dir: Option<PathBuf>) {
    println!("📊 Snapshot Catalog Status\n");

    let config = BuildConfig::new(data_dir, None, None);
    match show_status(&config) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status(config: &BuildConfig) -> crate::Result<()> {
    let catalog = SnapshotCatalog::open(&config.data_dir)?;

    if catalog.is_empty() {
        println!("⚠️  No snapshots found in {}", config.data_dir.display());
        return Ok(());
    }

    let first = &catalog.list()[0];
    let latest = catalog.latest()?;

    println!("📁 Directory: {}", catalog.dir().display());
    println!("📈 Snapshots: {}", format_number(catalog.len()));
    println!("   First:  {}", first.date);
    println!("   Latest: {}", latest.date);
    println!(
        "   History window: {} of last {}",
        catalog.trailing(config.history_window).len(),
        config.history_window
    );

    println!("\n═══════════════════════════════════════════════════════════\n");
    println!("🔹 Lookback windows (as of {})", latest.date);

    for (window, resolved) in services::resolve_windows(&catalog, latest.date) {
        match resolved {
            Some(file) => {
                let gap = (latest.date - file.date).num_days();
                println!("   {:>4}: {}  ({} days back)", window.label, file.file_name, gap);
            }
            None => println!("   {:>4}: no data available", window.label),
        }
    }

    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
