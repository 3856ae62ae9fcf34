//! Snapshot Format Constants
//!
//! Header names and tokens used by the DSE daily snapshot exports.
//!
//! ## Snapshot Layout
//!
//! One file per trading session, named `YYYY-MM-DD.csv`. The header row is
//! authored upstream and carries units and indicator parameters verbatim,
//! e.g. `Volume(Qty)`, `RSI [14]`, `Market Cap (mn)`.

/// Placeholder token the exporter writes for "no value"
pub const PLACEHOLDER_TOKEN: &str = "-";

/// File extension of snapshot files
pub const SNAPSHOT_EXTENSION: &str = "csv";

/// Date format embedded in snapshot file names
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of trailing snapshots scanned for the rolling price history
pub const DEFAULT_HISTORY_WINDOW: usize = 30;

/// Sector label used when a record has no sector
pub const UNKNOWN_SECTOR: &str = "Other";

/// Source header names for the identity and join columns
pub mod column {
    pub const SYMBOL: &str = "Symbol";
    pub const COMPANY: &str = "Company";
    pub const SECTOR: &str = "Sector";
    pub const CATEGORY: &str = "Category";

    /// Last traded price
    pub const LTP: &str = "LTP";
    pub const CLOSE: &str = "Close";
    pub const VOLUME: &str = "Volume(Qty)";
    pub const NAV: &str = "NAV(Year End)";
}
