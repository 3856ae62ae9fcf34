use crate::constants::DEFAULT_HISTORY_WINDOW;
use std::path::PathBuf;

/// Get snapshot directory from environment variable or use default
pub fn get_snapshot_dir() -> PathBuf {
    std::env::var("SNAPSHOT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/dse"))
}

/// Get dataset output path from environment variable or use default
pub fn get_output_path() -> PathBuf {
    std::env::var("MARKET_DATA_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/dse-market.json"))
}

/// Get rolling history length from environment variable or use default
pub fn get_history_window() -> usize {
    std::env::var("HISTORY_WINDOW")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HISTORY_WINDOW)
}
