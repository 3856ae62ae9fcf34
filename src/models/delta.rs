use crate::models::window::{LookbackWindow, LOOKBACK_WINDOWS, WINDOW_COUNT};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price and volume change for one lookback window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowDelta {
    pub price: Option<f64>,
    pub volume: Option<f64>,
}

/// Percentage changes for every lookback window of one symbol
///
/// Serialized as a flat object in window order:
/// `{"price_1d": .., "vol_1d": .., "price_1w": .., ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSet {
    deltas: [WindowDelta; WINDOW_COUNT],
}

impl Default for DeltaSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl DeltaSet {
    /// All windows null
    pub fn empty() -> Self {
        Self {
            deltas: [WindowDelta::default(); WINDOW_COUNT],
        }
    }

    /// Set the delta for the window at `index` in [`LOOKBACK_WINDOWS`]
    pub fn set(&mut self, index: usize, delta: WindowDelta) {
        self.deltas[index] = delta;
    }

    pub fn get(&self, label: &str) -> Option<WindowDelta> {
        LookbackWindow::find(label).map(|(i, _)| self.deltas[i])
    }

    /// Price delta by window label, e.g. `price("1d")`
    pub fn price(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(|d| d.price)
    }

    /// Volume delta by window label, e.g. `volume("1d")`
    pub fn volume(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(|d| d.volume)
    }

    /// Iterate windows with their deltas in table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static LookbackWindow, &WindowDelta)> {
        LOOKBACK_WINDOWS.iter().zip(self.deltas.iter())
    }
}

impl Serialize for DeltaSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WINDOW_COUNT * 2))?;
        for (window, delta) in self.iter() {
            map.serialize_entry(&window.price_key(), &delta.price)?;
            map.serialize_entry(&window.volume_key(), &delta.volume)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DeltaSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unknown keys are ignored and absent windows stay null
        let raw: HashMap<String, Option<f64>> = HashMap::deserialize(deserializer)?;

        let mut set = DeltaSet::empty();
        for (i, window) in LOOKBACK_WINDOWS.iter().enumerate() {
            set.deltas[i] = WindowDelta {
                price: raw.get(&window.price_key()).copied().flatten(),
                volume: raw.get(&window.volume_key()).copied().flatten(),
            };
        }
        Ok(set)
    }
}
