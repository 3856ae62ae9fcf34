mod build_config;
mod cell;
mod dataset;
mod delta;
mod metrics;
mod snapshot;
pub mod window;

pub use build_config::BuildConfig;
pub use cell::CellValue;
pub use dataset::{Dataset, DatasetMetadata, StockRecord};
pub use delta::{DeltaSet, WindowDelta};
pub use metrics::{MetricSource, NormalizedMetrics, METRIC_SOURCES};
pub use snapshot::{ParsedSnapshot, RawRecord, SnapshotFile};
pub use window::{LookbackWindow, LOOKBACK_WINDOWS, WINDOW_COUNT};

use std::collections::BTreeMap;

/// Price series per symbol, oldest first
pub type PriceHistory = Vec<f64>;

/// Rolling histories keyed by symbol
pub type HistoryMap = BTreeMap<String, PriceHistory>;
