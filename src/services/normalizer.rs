//! Record Normalizer
//!
//! Projects a raw snapshot row onto [`NormalizedMetrics`] through the
//! explicit header mapping in [`METRIC_SOURCES`].

use crate::constants::column;
use crate::models::{NormalizedMetrics, RawRecord, METRIC_SOURCES};

/// Project one raw record onto the metrics schema
///
/// Missing headers, placeholders, and non-numeric text all become `None`.
pub fn normalize(record: &RawRecord) -> NormalizedMetrics {
    let mut metrics = NormalizedMetrics::default();

    for source in METRIC_SOURCES {
        (source.assign)(&mut metrics, record.number(source.header));
    }

    metrics.pb = price_to_book(record.number(column::LTP), record.number(column::NAV));
    metrics
}

/// Price-to-book rounded to 2 decimals, `None` unless both inputs are positive
pub fn price_to_book(ltp: Option<f64>, nav: Option<f64>) -> Option<f64> {
    match (ltp, nav) {
        (Some(ltp), Some(nav)) if ltp > 0.0 && nav > 0.0 => Some(round2(ltp / nav)),
        _ => None,
    }
}

/// Round to 2 decimals from the exact binary value
///
/// `{:.2}` formats the exact value, so `1.115` (stored just below) gives
/// `1.11`. Exact ties only occur at multiples of 1/8 and round up.
fn round2(value: f64) -> f64 {
    if (value * 8.0).fract() == 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Source headers from the mapping table that are absent from `headers`
pub fn missing_metric_headers(headers: &[String]) -> Vec<&'static str> {
    METRIC_SOURCES
        .iter()
        .map(|s| s.header)
        .filter(|h| !headers.iter().any(|present| present.as_str() == *h))
        .collect()
}
