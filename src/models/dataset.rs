use crate::models::{DeltaSet, NormalizedMetrics};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One security in the published dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub category: Option<String>,
    pub metrics: NormalizedMetrics,
    pub deltas: DeltaSet,
    /// Trailing price series, oldest first
    pub history: Vec<f64>,
}

/// Run metadata of the published dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub generated_at: DateTime<Utc>,
    /// Date of the latest snapshot
    pub as_of_date: NaiveDate,
    pub total_records: usize,
}

/// The single artifact written per build run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub records: Vec<StockRecord>,
}

impl Dataset {
    pub fn new(as_of_date: NaiveDate, records: Vec<StockRecord>) -> Self {
        Self {
            metadata: DatasetMetadata {
                generated_at: Utc::now(),
                as_of_date,
                total_records: records.len(),
            },
            records,
        }
    }
}
