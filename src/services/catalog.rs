//! Date-Indexed Snapshot Catalog
//!
//! Lists the dated snapshot files of a directory and resolves lookback
//! targets to the nearest snapshot on or before a calendar date.

use crate::error::{AppError, Result};
use crate::models::SnapshotFile;
use chrono::{Days, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Chronologically sorted snapshot files of one directory
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    dir: PathBuf,
    files: Vec<SnapshotFile>,
}

impl SnapshotCatalog {
    /// Scan a directory for `YYYY-MM-DD.csv` files
    ///
    /// Files whose name does not carry a date are skipped with a warning.
    pub fn open(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .map_err(|e| AppError::Io(format!("Failed to read snapshot directory {}: {}", dir.display(), e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::Io(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            match SnapshotFile::from_path(&path) {
                Some(file) => files.push(file),
                None => {
                    if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                        warn!("Skipping {}: file name is not a YYYY-MM-DD date", path.display());
                    } else {
                        debug!("Ignoring non-snapshot file {}", path.display());
                    }
                }
            }
        }

        Ok(Self::from_files(dir, files))
    }

    /// Build a catalog from already discovered files
    pub fn from_files(dir: &Path, mut files: Vec<SnapshotFile>) -> Self {
        files.sort();
        Self {
            dir: dir.to_path_buf(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All snapshots, oldest first
    pub fn list(&self) -> &[SnapshotFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Result<&SnapshotFile> {
        self.files
            .last()
            .ok_or_else(|| AppError::NoSnapshotsAvailable(self.dir.clone()))
    }

    /// Nearest snapshot dated on or before `target`
    ///
    /// Linear scan keeping the smallest non-negative day difference. When two
    /// files carry the same date, the one sorting last by file name wins,
    /// which keeps `resolve` consistent with `latest`.
    pub fn resolve(&self, target: NaiveDate) -> Option<&SnapshotFile> {
        let mut best: Option<(i64, &SnapshotFile)> = None;

        for file in &self.files {
            let diff = (target - file.date).num_days();
            if diff < 0 {
                continue;
            }
            match best {
                Some((best_diff, _)) if diff > best_diff => {}
                _ => best = Some((diff, file)),
            }
        }

        best.map(|(_, file)| file)
    }

    /// Nearest snapshot on or before `days` calendar days before `from`
    pub fn resolve_offset(&self, from: NaiveDate, days: u64) -> Option<&SnapshotFile> {
        let target = from.checked_sub_days(Days::new(days))?;
        self.resolve(target)
    }

    /// The most recent `n` snapshots, oldest first
    pub fn trailing(&self, n: usize) -> &[SnapshotFile] {
        let start = self.files.len().saturating_sub(n);
        &self.files[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn catalog(names: &[&str]) -> SnapshotCatalog {
        let dir = Path::new("/snapshots");
        let files = names
            .iter()
            .map(|n| SnapshotFile::from_path(&dir.join(n)).unwrap())
            .collect();
        SnapshotCatalog::from_files(dir, files)
    }

    #[test]
    fn test_list_sorted_chronologically() {
        let catalog = catalog(&["2024-01-03.csv", "2023-12-29.csv", "2024-01-02.csv"]);
        let names: Vec<&str> = catalog.list().iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["2023-12-29.csv", "2024-01-02.csv", "2024-01-03.csv"]);
        assert_eq!(catalog.latest().unwrap().file_name, "2024-01-03.csv");
    }

    #[test]
    fn test_latest_on_empty_catalog() {
        let catalog = catalog(&[]);
        assert!(matches!(catalog.latest(), Err(AppError::NoSnapshotsAvailable(_))));
    }

    #[test]
    fn test_resolve_exact_and_prior() {
        let catalog = catalog(&["2024-01-01.csv", "2024-01-04.csv", "2024-01-08.csv"]);

        assert_eq!(catalog.resolve(date("2024-01-04")).unwrap().file_name, "2024-01-04.csv");
        // Weekend gap falls back to the previous session
        assert_eq!(catalog.resolve(date("2024-01-07")).unwrap().file_name, "2024-01-04.csv");
        assert_eq!(catalog.resolve(date("2030-01-01")).unwrap().file_name, "2024-01-08.csv");
        assert!(catalog.resolve(date("2023-12-31")).is_none());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let catalog = catalog(&["2024-01-01.csv", "2024-01-04.csv", "2024-01-08.csv"]);
        let first = catalog.resolve(date("2024-01-06")).cloned();
        for _ in 0..5 {
            assert_eq!(catalog.resolve(date("2024-01-06")).cloned(), first);
        }
    }

    #[test]
    fn test_resolve_duplicate_dates_last_name_wins() {
        // Non-padded names parse to the same calendar date
        let catalog = catalog(&["2024-01-05.csv", "2024-1-5.csv"]);
        assert_eq!(catalog.resolve(date("2024-01-06")).unwrap().file_name, "2024-1-5.csv");
        assert_eq!(catalog.latest().unwrap().file_name, "2024-1-5.csv");
    }

    #[test]
    fn test_resolve_offset() {
        let catalog = catalog(&["2023-01-10.csv", "2024-01-09.csv", "2024-01-10.csv"]);
        let as_of = date("2024-01-10");

        assert_eq!(catalog.resolve_offset(as_of, 1).unwrap().file_name, "2024-01-09.csv");
        assert_eq!(catalog.resolve_offset(as_of, 365).unwrap().file_name, "2023-01-10.csv");
        assert!(catalog.resolve_offset(as_of, 730).is_none());
    }

    #[test]
    fn test_trailing() {
        let catalog = catalog(&["2024-01-01.csv", "2024-01-02.csv", "2024-01-03.csv"]);
        assert_eq!(catalog.trailing(2).len(), 2);
        assert_eq!(catalog.trailing(2)[0].file_name, "2024-01-02.csv");
        assert_eq!(catalog.trailing(30).len(), 3);
    }

    #[test]
    fn test_open_skips_ineligible_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-01-02.csv"), "Symbol\n").unwrap();
        fs::write(dir.path().join("2024-01-01.csv"), "Symbol\n").unwrap();
        fs::write(dir.path().join("latest.csv"), "Symbol\n").unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();
        fs::create_dir(dir.path().join("2024-01-03.csv")).unwrap();

        let catalog = SnapshotCatalog::open(dir.path()).unwrap();
        let names: Vec<&str> = catalog.list().iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["2024-01-01.csv", "2024-01-02.csv"]);
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = tempdir().unwrap();
        let result = SnapshotCatalog::open(&dir.path().join("missing"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
