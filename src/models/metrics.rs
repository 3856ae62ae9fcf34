use serde::{Deserialize, Serialize};

/// Normalized metrics for one security
///
/// Field names are part of the output contract: bucket rules and the
/// rendering layer key off `pe`, `pb`, `rsi`, `beta`, `mktCap` and friends.
/// Every field is nullable; a missing or placeholder source cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetrics {
    pub ltp: Option<f64>,
    pub close: Option<f64>,
    pub pe: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub volume: Option<f64>,
    pub value: Option<f64>,
    pub mkt_cap: Option<f64>,
    pub nav: Option<f64>,
    pub eps: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    /// Price-to-book, derived from `ltp / nav`
    pub pb: Option<f64>,

    // Technicals
    pub williams_r: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub ema9: Option<f64>,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub tv: Option<f64>,
    pub co: Option<f64>,
    pub wma9: Option<f64>,
    pub wma12: Option<f64>,
    pub wma20: Option<f64>,

    // Liquidity and leverage
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,

    // Profitability
    pub ebitda_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub gross_margin: Option<f64>,
    pub roa: Option<f64>,
    pub roe: Option<f64>,
    pub roea: Option<f64>,
    pub roi: Option<f64>,

    // Valuation and per-share
    pub audited_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub paid_up_capital: Option<f64>,
    pub total_shares: Option<f64>,
}

/// Mapping from a canonical metric to the snapshot header it is read from
pub struct MetricSource {
    /// Output field name
    pub name: &'static str,
    /// Header as authored upstream
    pub header: &'static str,
    pub assign: fn(&mut NormalizedMetrics, Option<f64>),
}

macro_rules! source {
    ($name:literal, $header:literal, $field:ident) => {
        MetricSource {
            name: $name,
            header: $header,
            assign: |m, v| m.$field = v,
        }
    };
}

/// Every directly sourced metric. `pb` is derived and has no entry.
///
/// Note: `Willams %R [14]` is misspelled upstream and must stay that way.
pub const METRIC_SOURCES: &[MetricSource] = &[
    source!("ltp", "LTP", ltp),
    source!("close", "Close", close),
    source!("pe", "PE", pe),
    source!("rsi", "RSI [14]", rsi),
    source!("macd", "MACD [12,26]", macd),
    source!("macdSignal", "MACD Signal [9]", macd_signal),
    source!("volume", "Volume(Qty)", volume),
    source!("value", "Value(Turnover) (mn)", value),
    source!("mktCap", "Market Cap (mn)", mkt_cap),
    source!("nav", "NAV(Year End)", nav),
    source!("eps", "EPS", eps),
    source!("dividendYield", "Dividend Yield", dividend_yield),
    source!("beta", "Beta [5]", beta),
    source!("williamsR", "Willams %R [14]", williams_r),
    source!("sma20", "SMA [20]", sma20),
    source!("sma50", "SMA [50]", sma50),
    source!("sma200", "SMA [200]", sma200),
    source!("ema9", "EMA [9]", ema9),
    source!("ema12", "EMA [12]", ema12),
    source!("ema26", "EMA [26]", ema26),
    source!("bbUpper", "BB Upper [20,2]", bb_upper),
    source!("bbLower", "BB Lower [20,2]", bb_lower),
    source!("tv", "TV [22]", tv),
    source!("co", "CO [3,10]", co),
    source!("wma9", "WMA [9]", wma9),
    source!("wma12", "WMA [12]", wma12),
    source!("wma20", "WMA [20]", wma20),
    source!("currentRatio", "Current Ratio", current_ratio),
    source!("quickRatio", "Quick Ratio", quick_ratio),
    source!("debtToEquity", "Debt To Equity", debt_to_equity),
    source!("ebitdaMargin", "EBITDA Margin", ebitda_margin),
    source!("operatingMargin", "Operating Profit Margin", operating_margin),
    source!("netMargin", "Net Profit Margin", net_margin),
    source!("grossMargin", "Gross Profit Margin", gross_margin),
    source!("roa", "Return on Assets (ROA)", roa),
    source!("roe", "Return on Equity (ROE)", roe),
    source!("roea", "Return on Earnings Assets (ROEA)", roea),
    source!("roi", "Return on Investment (ROI)", roi),
    source!("auditedPe", "Audited PE", audited_pe),
    source!("forwardPe", "Forward PE", forward_pe),
    source!("paidUpCapital", "PaidUp Capital", paid_up_capital),
    source!("totalShares", "Total Shares", total_shares),
];
