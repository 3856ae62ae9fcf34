//! Bucket classification and sector aggregation
//!
//! Pure functions over a published record list. Nothing here keeps state
//! between calls; every query recomputes from the full list.

use crate::constants::UNKNOWN_SECTOR;
use crate::models::StockRecord;
use serde::Serialize;
use std::collections::HashMap;

/// A named rule-based bucket
pub struct BucketDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub criteria: &'static str,
    pub matches: fn(&StockRecord) -> bool,
}

/// `lo < value < hi`, false when the value is missing
fn between(value: Option<f64>, lo: f64, hi: f64) -> bool {
    value.is_some_and(|v| v > lo && v < hi)
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

fn is_value_pick(s: &StockRecord) -> bool {
    let m = &s.metrics;
    between(m.pe, 0.0, 15.0) && below(m.pb, 1.5) && above(m.dividend_yield, 3.0)
}

fn is_momentum_play(s: &StockRecord) -> bool {
    s.metrics.rsi.is_some_and(|rsi| (60.0..=80.0).contains(&rsi)) && above(s.deltas.price("1w"), 2.0)
}

fn is_safe_haven(s: &StockRecord) -> bool {
    between(s.metrics.beta, 0.0, 0.9) && above(s.metrics.mkt_cap, 5000.0)
}

fn is_reversal_candidate(s: &StockRecord) -> bool {
    between(s.metrics.rsi, 0.0, 30.0)
}

fn is_volume_shock(s: &StockRecord) -> bool {
    above(s.deltas.volume("1d"), 50.0)
}

pub const BUCKET_DEFINITIONS: &[BucketDefinition] = &[
    BucketDefinition {
        id: "value",
        title: "💎 Value Picks",
        description: "Undervalued stocks with solid fundamentals.",
        criteria: "PE < 15, PB < 1.5, Dividend Yield > 3%",
        matches: is_value_pick,
    },
    BucketDefinition {
        id: "momentum",
        title: "🚀 Momentum Plays",
        description: "Stocks showing strong upward price action.",
        criteria: "RSI (14) between 60-80, Weekly Price Change > 2%",
        matches: is_momentum_play,
    },
    BucketDefinition {
        id: "safe",
        title: "🛡️ Safe Havens",
        description: "Low volatility, large cap stocks.",
        criteria: "Beta < 0.9, Market Cap > 5000mn",
        matches: is_safe_haven,
    },
    BucketDefinition {
        id: "reversal",
        title: "🔄 Reversal Watch",
        description: "Oversold stocks that might bounce.",
        criteria: "RSI (14) < 30",
        matches: is_reversal_candidate,
    },
    BucketDefinition {
        id: "volume",
        title: "📢 Volume Shockers",
        description: "Unusual volume activity.",
        criteria: "Daily Volume > 50% increase vs Yesterday",
        matches: is_volume_shock,
    },
];

/// Records matching one bucket
#[derive(Debug, Clone, Serialize)]
pub struct BucketMatch<'a> {
    pub id: &'static str,
    pub title: &'static str,
    pub criteria: &'static str,
    pub matches: Vec<&'a StockRecord>,
}

/// Apply every bucket, keeping only buckets with at least one match
pub fn stock_buckets(records: &[StockRecord]) -> Vec<BucketMatch<'_>> {
    BUCKET_DEFINITIONS
        .iter()
        .map(|bucket| BucketMatch {
            id: bucket.id,
            title: bucket.title,
            criteria: bucket.criteria,
            matches: records.iter().filter(|r| (bucket.matches)(r)).collect(),
        })
        .filter(|b| !b.matches.is_empty())
        .collect()
}

/// Aggregated figures for one sector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAggregate {
    pub name: String,
    pub stock_count: usize,
    pub total_mkt_cap: f64,
    pub total_volume: f64,
    /// Mean 1-day price change, missing changes counted as 0
    pub avg_change: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// Group records by sector for the heatmap, largest market cap first
pub fn sector_heatmap(records: &[StockRecord]) -> Vec<SectorAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut sectors: HashMap<String, (SectorAggregate, f64)> = HashMap::new();

    for record in records {
        let name = record.sector.as_deref().unwrap_or(UNKNOWN_SECTOR);
        let (sector, change_sum) = sectors.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            (
                SectorAggregate {
                    name: name.to_string(),
                    stock_count: 0,
                    total_mkt_cap: 0.0,
                    total_volume: 0.0,
                    avg_change: 0.0,
                    positive_count: 0,
                    negative_count: 0,
                },
                0.0,
            )
        });

        let change = record.deltas.price("1d").unwrap_or(0.0);
        sector.stock_count += 1;
        sector.total_mkt_cap += record.metrics.mkt_cap.unwrap_or(0.0);
        sector.total_volume += record.metrics.volume.unwrap_or(0.0);
        if change > 0.0 {
            sector.positive_count += 1;
        }
        if change < 0.0 {
            sector.negative_count += 1;
        }
        *change_sum += change;
    }

    let mut result: Vec<SectorAggregate> = order
        .into_iter()
        .filter_map(|name| sectors.remove(&name))
        .map(|(mut sector, change_sum)| {
            sector.avg_change = change_sum / sector.stock_count as f64;
            sector
        })
        .collect();

    // Stable sort keeps first-seen order among equal market caps
    result.sort_by(|a, b| b.total_mkt_cap.total_cmp(&a.total_mkt_cap));
    result
}

/// Case-insensitive substring search over symbol, name, and sector
pub fn filter_records<'a>(records: &'a [StockRecord], query: &str) -> Vec<&'a StockRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }

    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&query));

    records
        .iter()
        .filter(|r| contains(Some(r.symbol.as_str())) || contains(r.name.as_deref()) || contains(r.sector.as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeltaSet, LookbackWindow, NormalizedMetrics, WindowDelta};

    fn stock(symbol: &str, sector: Option<&str>) -> StockRecord {
        StockRecord {
            symbol: symbol.to_string(),
            name: Some(format!("{} Ltd", symbol)),
            sector: sector.map(str::to_string),
            category: Some("A".to_string()),
            metrics: NormalizedMetrics::default(),
            deltas: DeltaSet::empty(),
            history: Vec::new(),
        }
    }

    fn with_delta(mut s: StockRecord, label: &str, price: Option<f64>, volume: Option<f64>) -> StockRecord {
        let (index, _) = LookbackWindow::find(label).unwrap();
        s.deltas.set(index, WindowDelta { price, volume });
        s
    }

    fn bucket_ids(records: &[StockRecord]) -> Vec<&'static str> {
        stock_buckets(records).iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_value_bucket() {
        let mut s = stock("BATBC", Some("Food"));
        s.metrics.pe = Some(12.0);
        s.metrics.pb = Some(1.2);
        s.metrics.dividend_yield = Some(4.5);
        assert_eq!(bucket_ids(&[s.clone()]), vec!["value"]);

        // Negative earnings never count as cheap
        s.metrics.pe = Some(-3.0);
        assert!(bucket_ids(&[s]).is_empty());
    }

    #[test]
    fn test_momentum_needs_weekly_change() {
        let mut s = stock("GP", Some("Telecommunication"));
        s.metrics.rsi = Some(65.0);
        assert!(bucket_ids(&[s.clone()]).is_empty());

        let s = with_delta(s, "1w", Some(2.5), None);
        assert_eq!(bucket_ids(&[s]), vec!["momentum"]);
    }

    #[test]
    fn test_safe_reversal_and_volume() {
        let mut safe = stock("SQURPHARMA", Some("Pharmaceuticals"));
        safe.metrics.beta = Some(0.7);
        safe.metrics.mkt_cap = Some(45000.0);

        let mut oversold = stock("BEXIMCO", Some("Miscellaneous"));
        oversold.metrics.rsi = Some(22.0);

        let shock = with_delta(stock("ROBI", Some("Telecommunication")), "1d", None, Some(75.0));

        let records = vec![safe, oversold, shock];
        assert_eq!(bucket_ids(&records), vec!["safe", "reversal", "volume"]);
    }

    #[test]
    fn test_missing_metrics_never_match() {
        let records = vec![stock("EMPTY", None)];
        assert!(stock_buckets(&records).is_empty());
    }

    #[test]
    fn test_sector_heatmap() {
        let mut gp = with_delta(stock("GP", Some("Telecommunication")), "1d", Some(2.5), None);
        gp.metrics.mkt_cap = Some(50000.0);
        gp.metrics.volume = Some(100000.0);
        let mut robi = with_delta(stock("ROBI", Some("Telecommunication")), "1d", Some(-1.2), None);
        robi.metrics.mkt_cap = Some(30000.0);
        robi.metrics.volume = Some(80000.0);
        let mut brac = with_delta(stock("BRACBANK", Some("Bank")), "1d", Some(-0.5), None);
        brac.metrics.mkt_cap = Some(35000.0);
        let mut orphan = stock("NEWCO", None);
        orphan.metrics.mkt_cap = None;

        let sectors = sector_heatmap(&[gp, robi, brac, orphan]);
        let names: Vec<&str> = sectors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Telecommunication", "Bank", "Other"]);

        let telecom = &sectors[0];
        assert_eq!(telecom.stock_count, 2);
        assert_eq!(telecom.total_mkt_cap, 80000.0);
        assert_eq!(telecom.total_volume, 180000.0);
        assert!((telecom.avg_change - 0.65).abs() < 1e-9);
        assert_eq!((telecom.positive_count, telecom.negative_count), (1, 1));

        let other = &sectors[2];
        assert_eq!(other.stock_count, 1);
        assert_eq!(other.avg_change, 0.0);
        assert_eq!((other.positive_count, other.negative_count), (0, 0));
    }

    #[test]
    fn test_filter_records() {
        let records = vec![
            stock("GP", Some("Telecommunication")),
            stock("SQURPHARMA", Some("Pharmaceuticals")),
        ];

        assert_eq!(filter_records(&records, "").len(), 2);
        assert_eq!(filter_records(&records, "pharma")[0].symbol, "SQURPHARMA");
        assert_eq!(filter_records(&records, "  TELECOM ")[0].symbol, "GP");
        assert_eq!(filter_records(&records, "gp ltd")[0].symbol, "GP");
        assert!(filter_records(&records, "bank").is_empty());
    }
}
