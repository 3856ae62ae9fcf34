//! Delta Engine
//!
//! Computes price and volume percentage changes between the latest snapshot
//! and the snapshot each lookback window resolves to.
//!
//! Windows are aligned by calendar date, not by file position: a `1w` window
//! compares against the nearest snapshot on or before `as_of - 7 days`.

use crate::constants::column;
use crate::models::{DeltaSet, LookbackWindow, SnapshotFile, WindowDelta, LOOKBACK_WINDOWS};
use crate::services::catalog::SnapshotCatalog;
use crate::services::loader::{SnapshotIndex, SnapshotLoader};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Percentage change: ((current - previous) / previous) * 100
///
/// - either side missing: `None`
/// - both zero: `Some(0.0)`
/// - zero previous with non-zero current: `None`
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);

    if previous == 0.0 {
        return if current == 0.0 { Some(0.0) } else { None };
    }

    Some(((current - previous) / previous) * 100.0)
}

/// How one lookback window was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSource {
    /// Compared against this snapshot
    Snapshot(SnapshotFile),
    /// No snapshot on or before the target date
    Unavailable,
    /// The resolved snapshot could not be loaded
    Failed { file: SnapshotFile, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowResolution {
    pub window: &'static LookbackWindow,
    pub source: WindowSource,
}

impl WindowResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self.source, WindowSource::Snapshot(_))
    }
}

/// Deltas per base row plus the window resolutions used to compute them
#[derive(Debug, Default)]
pub struct DeltaComputation {
    /// One entry per base snapshot row, in row order
    pub deltas: Vec<DeltaSet>,
    pub resolutions: Vec<WindowResolution>,
}

impl DeltaComputation {
    pub fn resolved_windows(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_resolved()).count()
    }

    /// Deltas of one base row, `None` past the end
    pub fn row(&self, index: usize) -> Option<&DeltaSet> {
        self.deltas.get(index)
    }
}

/// Resolve every lookback window against the catalog without loading files
pub fn resolve_windows(
    catalog: &SnapshotCatalog,
    as_of: NaiveDate,
) -> Vec<(&'static LookbackWindow, Option<&SnapshotFile>)> {
    LOOKBACK_WINDOWS
        .iter()
        .map(|window| (window, catalog.resolve_offset(as_of, window.days)))
        .collect()
}

/// Compute deltas for every row of the base snapshot
///
/// Each window's snapshot is resolved and loaded once regardless of row
/// count. A window without a usable snapshot leaves that window null for
/// every row. Each base row compares its own close and volume; on the
/// historical side a repeated symbol resolves to its last row.
pub fn compute_deltas(
    base: &SnapshotIndex,
    catalog: &SnapshotCatalog,
    loader: &mut SnapshotLoader,
) -> DeltaComputation {
    let as_of = base.file.date;
    let rows: Vec<(Option<String>, Option<f64>, Option<f64>)> = base
        .snapshot
        .records
        .iter()
        .map(|r| (r.symbol(), r.number(column::CLOSE), r.number(column::VOLUME)))
        .collect();

    let mut deltas = vec![DeltaSet::empty(); rows.len()];
    let mut resolutions = Vec::with_capacity(LOOKBACK_WINDOWS.len());

    for (index, (window, resolved)) in resolve_windows(catalog, as_of).into_iter().enumerate() {
        let Some(file) = resolved else {
            info!("  {}: No data available", window.label);
            resolutions.push(WindowResolution {
                window,
                source: WindowSource::Unavailable,
            });
            continue;
        };

        let historical = match loader.load(file) {
            Ok(historical) => historical,
            Err(e) => {
                warn!("  {}: {} could not be loaded, deltas left null: {}", window.label, file.file_name, e);
                resolutions.push(WindowResolution {
                    window,
                    source: WindowSource::Failed {
                        file: file.clone(),
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };

        info!("  {}: Using {}", window.label, file.file_name);

        for ((symbol, close, volume), set) in rows.iter().zip(deltas.iter_mut()) {
            let Some(previous) = symbol.as_deref().and_then(|s| historical.record(s)) else {
                continue;
            };
            set.set(
                index,
                WindowDelta {
                    price: percent_change(*close, previous.number(column::CLOSE)),
                    volume: percent_change(*volume, previous.number(column::VOLUME)),
                },
            );
        }

        resolutions.push(WindowResolution {
            window,
            source: WindowSource::Snapshot(file.clone()),
        });
    }

    DeltaComputation { deltas, resolutions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::snapshot_parser::parse_snapshot;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_percent_change_formula() {
        assert_eq!(percent_change(Some(110.0), Some(100.0)), Some(10.0));
        assert_eq!(percent_change(Some(90.0), Some(100.0)), Some(-10.0));
        assert_eq!(percent_change(Some(0.0), Some(50.0)), Some(-100.0));

        let expected = (123.4 - 98.7) / 98.7 * 100.0;
        assert_eq!(percent_change(Some(123.4), Some(98.7)), Some(expected));
    }

    #[test]
    fn test_percent_change_zero_and_missing() {
        assert_eq!(percent_change(Some(0.0), Some(0.0)), Some(0.0));
        assert_eq!(percent_change(Some(5.0), Some(0.0)), None);
        assert_eq!(percent_change(None, Some(100.0)), None);
        assert_eq!(percent_change(Some(100.0), None), None);
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn base_index(catalog: &SnapshotCatalog) -> SnapshotIndex {
        let file = catalog.latest().unwrap().clone();
        let content = fs::read_to_string(&file.path).unwrap();
        let snapshot = parse_snapshot(&content, &file.path).unwrap();
        SnapshotIndex::new(file, snapshot)
    }

    #[test]
    fn test_compute_deltas_by_calendar_date() {
        let dir = tempdir().unwrap();
        write(dir.path(), "2024-01-01.csv", "Symbol,Close,Volume(Qty)\nGP,100,1000\nROBI,0,0\n");
        write(dir.path(), "2024-01-07.csv", "Symbol,Close,Volume(Qty)\nGP,105,1500\n");
        write(dir.path(), "2024-01-08.csv", "Symbol,Close,Volume(Qty)\nGP,110,2000\nROBI,0,0\n");

        let catalog = SnapshotCatalog::open(dir.path()).unwrap();
        let base = base_index(&catalog);
        let mut loader = SnapshotLoader::new();
        let result = compute_deltas(&base, &catalog, &mut loader);

        let gp = &result.deltas[0];
        let expected_1d = (110.0 - 105.0) / 105.0 * 100.0;
        assert_eq!(gp.price("1d"), Some(expected_1d));
        assert_eq!(gp.price("1w"), Some(10.0));
        assert_eq!(gp.volume("1w"), Some(100.0));
        assert_eq!(gp.price("1m"), None);

        let robi = &result.deltas[1];
        // ROBI is absent from the 1d snapshot
        assert_eq!(robi.price("1d"), None);
        assert_eq!(robi.price("1w"), Some(0.0));

        // Windows 1d and 1w resolve to two distinct files
        assert_eq!(loader.reads(), 2);
        assert_eq!(result.resolved_windows(), 2);
        assert_eq!(result.resolutions.len(), LOOKBACK_WINDOWS.len());
    }

    #[test]
    fn test_broken_window_file_degrades_to_null() {
        let dir = tempdir().unwrap();
        write(dir.path(), "2024-01-07.csv", "");
        write(dir.path(), "2024-01-08.csv", "Symbol,Close,Volume(Qty)\nGP,110,2000\n");

        let catalog = SnapshotCatalog::open(dir.path()).unwrap();
        let base = base_index(&catalog);
        let mut loader = SnapshotLoader::new();
        let result = compute_deltas(&base, &catalog, &mut loader);

        assert_eq!(result.row(0), Some(&DeltaSet::empty()));
        assert!(matches!(result.resolutions[0].source, WindowSource::Failed { .. }));
        assert_eq!(result.resolved_windows(), 0);
    }

    #[test]
    fn test_repeated_base_symbol_uses_own_row() {
        let dir = tempdir().unwrap();
        write(dir.path(), "2024-01-07.csv", "Symbol,Close,Volume(Qty)\nX,100,1000\n");
        write(dir.path(), "2024-01-08.csv", "Symbol,Close,Volume(Qty)\nX,110,1000\nX,200,3000\n");

        let catalog = SnapshotCatalog::open(dir.path()).unwrap();
        let base = base_index(&catalog);
        let mut loader = SnapshotLoader::new();
        let result = compute_deltas(&base, &catalog, &mut loader);

        assert_eq!(result.deltas.len(), 2);
        assert_eq!(result.deltas[0].price("1d"), Some(10.0));
        assert_eq!(result.deltas[0].volume("1d"), Some(0.0));
        assert_eq!(result.deltas[1].price("1d"), Some(100.0));
        assert_eq!(result.deltas[1].volume("1d"), Some(200.0));
    }

    #[test]
    fn test_row_without_symbol_stays_null() {
        let dir = tempdir().unwrap();
        write(dir.path(), "2024-01-07.csv", "Symbol,Close,Volume(Qty)\nGP,100,1000\n");
        write(dir.path(), "2024-01-08.csv", "Symbol,Close,Volume(Qty)\n-,110,1000\nGP,105,1000\n");

        let catalog = SnapshotCatalog::open(dir.path()).unwrap();
        let base = base_index(&catalog);
        let mut loader = SnapshotLoader::new();
        let result = compute_deltas(&base, &catalog, &mut loader);

        assert_eq!(result.row(0), Some(&DeltaSet::empty()));
        assert_eq!(result.row(1).and_then(|d| d.price("1d")), Some(5.0));
        assert_eq!(result.row(2), None);
    }
}
