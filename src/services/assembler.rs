//! Dataset Assembler
//!
//! Orchestrates a full build run:
//! - open the catalog and load the latest snapshot (fatal on failure)
//! - validate the header row against the metric mapping table
//! - compute lookback deltas
//! - build rolling histories over the trailing snapshots
//! - assemble one record per base row and publish the dataset atomically
//!
//! Nothing is written until every in-memory step has succeeded, and the
//! write itself goes through a temporary file renamed over the destination.

use crate::constants::column;
use crate::error::{AppError, Result};
use crate::models::{BuildConfig, Dataset, DeltaSet, HistoryMap, RawRecord, SnapshotFile, StockRecord};
use crate::services::catalog::SnapshotCatalog;
use crate::services::delta_engine::compute_deltas;
use crate::services::history::{build_history, price_observations};
use crate::services::loader::SnapshotLoader;
use crate::services::normalizer::{missing_metric_headers, normalize};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Statistics for a build run
#[derive(Debug, Clone)]
pub struct BuildStats {
    pub records: usize,
    pub as_of_date: NaiveDate,
    pub base_file: String,
    pub snapshots_available: usize,
    pub windows_resolved: usize,
    pub history_snapshots: usize,
    /// Distinct snapshot files parsed
    pub files_read: usize,
    pub missing_headers: Vec<&'static str>,
    pub duration: Duration,
}

/// Result of a completed build run
#[derive(Debug)]
pub struct BuildReport {
    pub stats: BuildStats,
    pub output_path: PathBuf,
    pub bytes_written: u64,
}

/// Build the dataset in memory without writing it
pub fn build_dataset(config: &BuildConfig) -> Result<(Dataset, BuildStats)> {
    let start_time = Instant::now();
    config.validate()?;

    // Step 1: Catalog and base snapshot
    let catalog = SnapshotCatalog::open(&config.data_dir)?;
    let latest = catalog.latest()?.clone();
    info!("Processing latest data: {}", latest.file_name);

    let mut loader = SnapshotLoader::new();
    let base = loader.load(&latest)?;

    // Step 2: Header validation
    let missing_headers = missing_metric_headers(&base.snapshot.headers);
    for header in &missing_headers {
        warn!("Header '{}' missing from {}, metric will be null", header, latest.file_name);
    }

    // Step 3: Deltas
    info!("Loading historical data for delta calculations...");
    let computation = compute_deltas(&base, &catalog, &mut loader);

    // Step 4: Rolling histories
    let history_files = catalog.trailing(config.history_window);
    info!("Building price histories from {} files...", history_files.len());
    let history = scan_history(history_files, &mut loader, config.show_progress);

    // Step 5: Assembly
    let records: Vec<StockRecord> = base
        .snapshot
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| assemble_record(r, computation.row(i), &history))
        .collect();

    let dataset = Dataset::new(latest.date, records);
    let stats = BuildStats {
        records: dataset.records.len(),
        as_of_date: latest.date,
        base_file: latest.file_name.clone(),
        snapshots_available: catalog.len(),
        windows_resolved: computation.resolved_windows(),
        history_snapshots: history_files.len(),
        files_read: loader.reads(),
        missing_headers,
        duration: start_time.elapsed(),
    };

    Ok((dataset, stats))
}

/// Parse the trailing snapshots and fold them into rolling histories
///
/// A file that fails to load contributes no observations, so every symbol
/// still gets a 0 for that position.
fn scan_history(
    files: &[SnapshotFile],
    loader: &mut SnapshotLoader,
    show_progress: bool,
) -> HistoryMap {
    let pb = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut observations = Vec::with_capacity(files.len());
    for file in files {
        pb.set_message(file.file_name.clone());
        match loader.load(file) {
            Ok(index) => observations.push(price_observations(&index.snapshot)),
            Err(e) => {
                warn!("History snapshot {} skipped: {}", file.file_name, e);
                observations.push(Vec::new());
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    build_history(observations.iter().map(Vec::as_slice))
}

fn non_empty_text(record: &RawRecord, header: &str) -> Option<String> {
    record
        .text(header)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Merge normalized metrics, deltas, and history for one base row
fn assemble_record(record: &RawRecord, deltas: Option<&DeltaSet>, history: &HistoryMap) -> StockRecord {
    let symbol = record.symbol();
    let deltas = deltas.cloned().unwrap_or_default();
    let series = symbol
        .as_ref()
        .and_then(|s| history.get(s))
        .cloned()
        .unwrap_or_default();

    StockRecord {
        symbol: symbol.unwrap_or_default(),
        name: non_empty_text(record, column::COMPANY),
        sector: non_empty_text(record, column::SECTOR),
        category: non_empty_text(record, column::CATEGORY),
        metrics: normalize(record),
        deltas,
        history: series,
    }
}

/// Publish the dataset atomically
///
/// Serializes fully in memory, writes a temporary file next to the
/// destination, then renames it into place. Returns the bytes written.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<u64> {
    let mut bytes = serde_json::to_vec_pretty(dataset)?;
    bytes.push(b'\n');

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|e| AppError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| AppError::Io(format!("Failed to create temp file in {}: {}", parent.display(), e)))?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| AppError::Io(format!("Failed to replace {}: {}", path.display(), e.error)))?;

    Ok(bytes.len() as u64)
}

/// Load a previously published dataset
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read dataset {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

/// Main entry point: build and publish the dataset
pub fn run_build(config: &BuildConfig) -> Result<BuildReport> {
    let (dataset, stats) = build_dataset(config)?;
    let bytes_written = write_dataset(&config.output_path, &dataset)?;

    info!("Successfully generated {}", config.output_path.display());
    info!("Total stocks: {}", stats.records);

    Ok(BuildReport {
        stats,
        output_path: config.output_path.clone(),
        bytes_written,
    })
}
