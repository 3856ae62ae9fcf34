//! Snapshot Parser
//!
//! Reads one DSE daily snapshot (header row + one row per security) into
//! typed records, and writes parsed records back out as CSV.
//!
//! Cell splitting is quote-aware: every `"` toggles the quoted state and is
//! dropped, and a comma only separates cells outside quotes. This matches how
//! the exporter wraps grouped numerals (`"1,234"`) and bracketed headers
//! (`"MACD [12,26]"`).

use crate::constants::column;
use crate::error::{AppError, Result};
use crate::models::{CellValue, ParsedSnapshot, RawRecord};
use std::io::Write;
use std::path::Path;
use tracing::warn;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Split one line into trimmed cells
///
/// Returns the cells and whether the quotes on the line were balanced.
pub fn split_line(line: &str) -> (Vec<String>, bool) {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUOTE {
            in_quotes = !in_quotes;
        } else if c == DELIMITER && !in_quotes {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    cells.push(current.trim().to_string());

    (cells, !in_quotes)
}

/// Parse snapshot content
///
/// `origin` only names the source in errors and warnings.
pub fn parse_snapshot(content: &str, origin: &Path) -> Result<ParsedSnapshot> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| AppError::malformed(origin, "missing header row"))?;

    let (headers, balanced) = split_line(header_line);
    if !balanced {
        warn!("Unbalanced quotes in header of {}", origin.display());
    }

    let mut records = Vec::new();
    for (line_num, line) in lines {
        let (values, balanced) = split_line(line);
        if !balanced {
            warn!("Unbalanced quotes on line {} of {}", line_num + 1, origin.display());
        }

        let mut record = RawRecord::new();
        for (i, header) in headers.iter().enumerate() {
            // Short rows leave trailing columns null; symbols are join keys
            // and never coerced
            let value = match values.get(i) {
                Some(v) if header == column::SYMBOL => CellValue::verbatim(v),
                Some(v) => CellValue::from_cell(v),
                None => CellValue::Null,
            };
            record.insert(header.clone(), value);
        }
        records.push(record);
    }

    Ok(ParsedSnapshot { headers, records })
}

/// Read and parse a snapshot file
pub fn read_snapshot(path: &Path) -> Result<ParsedSnapshot> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::malformed(path, format!("failed to read: {}", e)))?;
    parse_snapshot(&content, path)
}

/// Write a parsed snapshot back out as CSV
///
/// Nulls are written as the placeholder token and numbers in their shortest
/// round-trip form, so re-parsing yields the same header-to-value mapping.
pub fn write_snapshot<W: Write>(snapshot: &ParsedSnapshot, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(&snapshot.headers)?;

    for record in &snapshot.records {
        let row: Vec<String> = snapshot
            .headers
            .iter()
            .map(|h| record.get(h).unwrap_or(&CellValue::Null).to_string())
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedSnapshot {
        parse_snapshot(content, Path::new("test.csv")).unwrap()
    }

    #[test]
    fn test_split_line_plain() {
        let (cells, balanced) = split_line("GP, Grameenphone ,Telecom,A");
        assert_eq!(cells, vec!["GP", "Grameenphone", "Telecom", "A"]);
        assert!(balanced);
    }

    #[test]
    fn test_split_line_quoted_delimiter() {
        let (cells, balanced) = split_line(r#"X,"1,234",-,"MACD [12,26]""#);
        assert_eq!(cells, vec!["X", "1,234", "-", "MACD [12,26]"]);
        assert!(balanced);
    }

    #[test]
    fn test_split_line_unbalanced() {
        let (cells, balanced) = split_line(r#"X,"open,end"#);
        assert_eq!(cells, vec!["X", "open,end"]);
        assert!(!balanced);
    }

    #[test]
    fn test_parse_headers_and_cells() {
        let snapshot = parse("Symbol,Company,\"Volume(Qty)\",LTP,Close\nX,Co,\"1,234\",-,110\n");

        assert_eq!(snapshot.headers, vec!["Symbol", "Company", "Volume(Qty)", "LTP", "Close"]);
        assert_eq!(snapshot.records.len(), 1);

        let record = &snapshot.records[0];
        assert_eq!(record.text("Symbol"), Some("X"));
        assert_eq!(record.number("Volume(Qty)"), Some(1234.0));
        assert_eq!(record.get("LTP"), Some(&CellValue::Null));
        assert_eq!(record.number("Close"), Some(110.0));
    }

    #[test]
    fn test_symbol_kept_verbatim() {
        let snapshot = parse("Symbol,Close\n00123,10\n1.50,\"1,000\"\n-,5\n");
        let symbols: Vec<Option<String>> = snapshot.records.iter().map(RawRecord::symbol).collect();

        assert_eq!(symbols, vec![Some("00123".to_string()), Some("1.50".to_string()), None]);
        assert_eq!(snapshot.records[1].number("Close"), Some(1000.0));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let snapshot = parse("\n  \nSymbol,Close\r\nA,1\r\n   \r\nB,2\r\n\r\n");
        assert_eq!(snapshot.headers, vec!["Symbol", "Close"]);
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[1].number("Close"), Some(2.0));
    }

    #[test]
    fn test_short_row_fills_null() {
        let snapshot = parse("Symbol,Close,PE\nA,1\n");
        let record = &snapshot.records[0];
        assert_eq!(record.number("Close"), Some(1.0));
        assert_eq!(record.get("PE"), Some(&CellValue::Null));
    }

    #[test]
    fn test_empty_content_is_malformed() {
        let err = parse_snapshot("  \n\n", Path::new("empty.csv")).unwrap_err();
        assert!(matches!(err, AppError::MalformedSnapshot { .. }));
    }

    #[test]
    fn test_header_only_has_no_records() {
        let snapshot = parse("Symbol,Close\n");
        assert_eq!(snapshot.headers.len(), 2);
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn test_write_then_parse_preserves_values() {
        let original = parse(
            "Symbol,Company,\"MACD [12,26]\",Close,\"Volume(Qty)\",Note\n\
             GP,\"Grameenphone, Ltd\",0.25,310.5,\"12,500\",\n\
             ROBI,Robi,-,-,800,watch\n",
        );

        let mut buffer = Vec::new();
        write_snapshot(&original, &mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        let reparsed = parse(&written);

        assert_eq!(reparsed, original);
    }
}
