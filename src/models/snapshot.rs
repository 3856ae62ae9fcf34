use crate::constants::{column, SNAPSHOT_DATE_FORMAT, SNAPSHOT_EXTENSION};
use crate::models::CellValue;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A dated snapshot file in the catalog directory
///
/// Ordering is `(date, file_name)`, which for canonical `YYYY-MM-DD.csv`
/// names is the same as lexicographic file name order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotFile {
    pub date: NaiveDate,
    pub file_name: String,
    pub path: PathBuf,
}

impl SnapshotFile {
    /// Build from a path, returning `None` when the name does not carry a date
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if !extension.eq_ignore_ascii_case(SNAPSHOT_EXTENSION) {
            return None;
        }

        let stem = path.file_stem()?.to_str()?;
        let date = NaiveDate::parse_from_str(stem, SNAPSHOT_DATE_FORMAT).ok()?;
        let file_name = path.file_name()?.to_str()?.to_string();

        Some(Self {
            date,
            file_name,
            path: path.to_path_buf(),
        })
    }
}

/// One row of a snapshot, keyed by the header names as authored upstream
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: HashMap<String, CellValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; a repeated header overwrites the earlier column
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.fields.insert(header.into(), value);
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields.get(header)
    }

    /// Numeric value of a field, `None` for null, text, or missing fields
    pub fn number(&self, header: &str) -> Option<f64> {
        self.get(header).and_then(CellValue::as_number)
    }

    /// Text value of a field, `None` for null, numbers, or missing fields
    pub fn text(&self, header: &str) -> Option<&str> {
        self.get(header).and_then(CellValue::as_text)
    }

    /// Join key across snapshots, the cell text as written
    pub fn symbol(&self) -> Option<String> {
        self.text(column::SYMBOL)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// A fully parsed snapshot: header order plus one record per security
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSnapshot {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl ParsedSnapshot {
    /// Index records by symbol; rows without a symbol are not indexed
    ///
    /// When a symbol repeats, the last row wins.
    pub fn index_by_symbol(&self) -> HashMap<String, usize> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.symbol().map(|s| (s, i)))
            .collect()
    }
}
