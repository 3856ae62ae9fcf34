//! Lookback windows for delta computation
//!
//! The table below is the single source of truth for window labels, their
//! day offsets, and the output keys (`price_<label>`, `vol_<label>`).

/// Number of lookback windows
pub const WINDOW_COUNT: usize = 19;

/// A named lookback horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookbackWindow {
    /// Short label used in output keys, e.g. "1w"
    pub label: &'static str,
    /// Calendar days subtracted from the as-of date
    pub days: u64,
}

impl LookbackWindow {
    const fn new(label: &'static str, days: u64) -> Self {
        Self { label, days }
    }

    /// Output key for the price delta, e.g. `price_1w`
    pub fn price_key(&self) -> String {
        format!("price_{}", self.label)
    }

    /// Output key for the volume delta, e.g. `vol_1w`
    pub fn volume_key(&self) -> String {
        format!("vol_{}", self.label)
    }

    /// Look up a window by label
    pub fn find(label: &str) -> Option<(usize, &'static LookbackWindow)> {
        LOOKBACK_WINDOWS
            .iter()
            .enumerate()
            .find(|(_, w)| w.label == label)
    }
}

/// 1d, 1w, 1m, 6m, then yearly from 1y to 15y
pub const LOOKBACK_WINDOWS: [LookbackWindow; WINDOW_COUNT] = [
    LookbackWindow::new("1d", 1),
    LookbackWindow::new("1w", 7),
    LookbackWindow::new("1m", 30),
    LookbackWindow::new("6m", 180),
    LookbackWindow::new("1y", 365),
    LookbackWindow::new("2y", 730),
    LookbackWindow::new("3y", 1095),
    LookbackWindow::new("4y", 1460),
    LookbackWindow::new("5y", 1825),
    LookbackWindow::new("6y", 2190),
    LookbackWindow::new("7y", 2555),
    LookbackWindow::new("8y", 2920),
    LookbackWindow::new("9y", 3285),
    LookbackWindow::new("10y", 3650),
    LookbackWindow::new("11y", 4015),
    LookbackWindow::new("12y", 4380),
    LookbackWindow::new("13y", 4745),
    LookbackWindow::new("14y", 5110),
    LookbackWindow::new("15y", 5475),
];
