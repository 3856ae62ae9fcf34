//! Rolling History Builder
//!
//! Builds the trailing price series per symbol used for sparklines.
//!
//! Each snapshot is reduced to a list of `(symbol, price)` observations and
//! the lists are folded in chronological order. Every symbol seen in any
//! scanned snapshot gets exactly one value per snapshot: its price where
//! present, otherwise 0.

use crate::constants::column;
use crate::models::{HistoryMap, ParsedSnapshot, RawRecord};
use std::collections::HashMap;

/// Price observation for one row: `Close`, else `LTP`, else 0
///
/// A zero close counts as missing, so a halted security that still reports
/// a last traded price keeps a usable observation.
pub fn observed_price(record: &RawRecord) -> f64 {
    [column::CLOSE, column::LTP]
        .iter()
        .filter_map(|h| record.number(h))
        .find(|p| *p != 0.0)
        .unwrap_or(0.0)
}

/// Reduce one snapshot to its price observations, in row order
pub fn price_observations(snapshot: &ParsedSnapshot) -> Vec<(String, f64)> {
    snapshot
        .records
        .iter()
        .filter_map(|r| r.symbol().map(|s| (s, observed_price(r))))
        .collect()
}

/// Fold one snapshot's observations into the history built so far
///
/// `scanned` is the number of snapshots already folded into `history`.
pub fn merge_observations(mut history: HistoryMap, scanned: usize, observations: &[(String, f64)]) -> HistoryMap {
    // A repeated symbol within one snapshot keeps its last row, as the
    // delta join does
    let prices: HashMap<&str, f64> = observations.iter().map(|(s, p)| (s.as_str(), *p)).collect();

    for (symbol, price) in &prices {
        history
            .entry(symbol.to_string())
            .or_insert_with(|| vec![0.0; scanned])
            .push(*price);
    }

    for (symbol, series) in history.iter_mut() {
        if !prices.contains_key(symbol.as_str()) {
            series.push(0.0);
        }
    }

    history
}

/// Build rolling histories from per-snapshot observations, oldest first
pub fn build_history<'a, I>(observations: I) -> HistoryMap
where
    I: IntoIterator<Item = &'a [(String, f64)]>,
{
    observations
        .into_iter()
        .enumerate()
        .fold(HistoryMap::new(), |history, (scanned, obs)| {
            merge_observations(history, scanned, obs)
        })
}
