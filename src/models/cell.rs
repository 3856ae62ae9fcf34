use crate::constants::PLACEHOLDER_TOKEN;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed cell from a snapshot row
///
/// Cells are coerced once at parse time:
/// - the placeholder token `-` becomes [`CellValue::Null`]
/// - non-empty text convertible to a finite number becomes [`CellValue::Number`]
/// - anything else stays trimmed [`CellValue::Text`] (including the empty cell)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Coerce a raw (already unquoted) cell
    pub fn from_cell(raw: &str) -> Self {
        let value = raw.trim();

        if value == PLACEHOLDER_TOKEN {
            return CellValue::Null;
        }
        if value.is_empty() {
            return CellValue::Text(String::new());
        }

        match parse_number(value) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(value.to_string()),
        }
    }

    /// Keep a raw cell as text, only mapping the placeholder to null
    pub fn verbatim(raw: &str) -> Self {
        let value = raw.trim();
        if value == PLACEHOLDER_TOKEN {
            CellValue::Null
        } else {
            CellValue::Text(value.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Null => write!(f, "{}", PLACEHOLDER_TOKEN),
        }
    }
}

/// Parse a plain or comma-grouped numeral into a finite number
///
/// Grouped numerals (`1,234`, `-12,345.50`) only reach this point from quoted
/// cells. The grouping must be strict: a leading group of 1-3 digits followed
/// by groups of exactly 3 digits. Anything else with a comma stays text.
fn parse_number(value: &str) -> Option<f64> {
    if value.contains(',') {
        return parse_grouped(value);
    }

    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_grouped(value: &str) -> Option<f64> {
    let unsigned = value.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(value);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let groups: Vec<&str> = int_part.split(',').collect();
    if groups.len() < 2 {
        return None;
    }
    if !all_digits(groups[0]) || groups[0].len() > 3 {
        return None;
    }
    if !groups[1..].iter().all(|g| g.len() == 3 && all_digits(g)) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !all_digits(frac) {
            return None;
        }
    }

    value.replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
}
