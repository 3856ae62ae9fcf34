use crate::error::Result;
use crate::models::{ParsedSnapshot, RawRecord, SnapshotFile};
use crate::services::snapshot_parser::read_snapshot;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A parsed snapshot with its symbol index
#[derive(Debug)]
pub struct SnapshotIndex {
    pub file: SnapshotFile,
    pub snapshot: ParsedSnapshot,
    by_symbol: HashMap<String, usize>,
}

impl SnapshotIndex {
    pub fn new(file: SnapshotFile, snapshot: ParsedSnapshot) -> Self {
        let by_symbol = snapshot.index_by_symbol();
        Self {
            file,
            snapshot,
            by_symbol,
        }
    }

    pub fn record(&self, symbol: &str) -> Option<&RawRecord> {
        self.by_symbol.get(symbol).map(|&i| &self.snapshot.records[i])
    }

    pub fn symbol_count(&self) -> usize {
        self.by_symbol.len()
    }
}

/// Parses catalog files on demand, at most once each per run
#[derive(Debug, Default)]
pub struct SnapshotLoader {
    cache: HashMap<PathBuf, Arc<SnapshotIndex>>,
    reads: usize,
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, reusing the parsed copy when already read
    ///
    /// Failures are not cached; the caller decides whether they are fatal.
    pub fn load(&mut self, file: &SnapshotFile) -> Result<Arc<SnapshotIndex>> {
        if let Some(index) = self.cache.get(&file.path) {
            debug!("Reusing parsed {}", file.file_name);
            return Ok(Arc::clone(index));
        }

        self.reads += 1;
        let snapshot = read_snapshot(&file.path)?;
        let index = Arc::new(SnapshotIndex::new(file.clone(), snapshot));
        debug!("Parsed {} ({} symbols)", file.file_name, index.symbol_count());

        self.cache.insert(file.path.clone(), Arc::clone(&index));
        Ok(index)
    }

    /// Number of distinct file reads performed so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_reads_each_file_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2024-01-02.csv");
        fs::write(&path, "Symbol,Close\nGP,310\nROBI,28.4\n").unwrap();
        let file = SnapshotFile::from_path(&path).unwrap();

        let mut loader = SnapshotLoader::new();
        let first = loader.load(&file).unwrap();
        let second = loader.load(&file).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.reads(), 1);
        assert_eq!(first.record("ROBI").unwrap().number("Close"), Some(28.4));
        assert!(first.record("BEXIMCO").is_none());
    }

    #[test]
    fn test_load_failure_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2024-01-02.csv");
        fs::write(&path, "\n\n").unwrap();
        let file = SnapshotFile::from_path(&path).unwrap();

        let mut loader = SnapshotLoader::new();
        assert!(loader.load(&file).is_err());
    }
}
