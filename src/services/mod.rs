pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod delta_engine;
pub mod history;
pub mod loader;
pub mod normalizer;
pub mod snapshot_parser;

pub use assembler::{build_dataset, read_dataset, run_build, write_dataset, BuildReport, BuildStats};
pub use catalog::SnapshotCatalog;
pub use classifier::{filter_records, sector_heatmap, stock_buckets, BucketMatch, SectorAggregate, BUCKET_DEFINITIONS};
pub use delta_engine::{compute_deltas, percent_change, resolve_windows, DeltaComputation, WindowResolution, WindowSource};
pub use history::build_history;
pub use loader::{SnapshotIndex, SnapshotLoader};
pub use normalizer::{missing_metric_headers, normalize};
pub use snapshot_parser::{parse_snapshot, read_snapshot, write_snapshot};
