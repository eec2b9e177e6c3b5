use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::numeric::coerce_f64;

/// Records scanned for a header before giving up and using row 0.
const HEADER_SEARCH_ROWS: usize = 5;

/// Rows of text cells read from a reference file, before any typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a table from string slices, mainly for tests and callers that
    /// already hold the cells in memory.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| normalize_header(h)).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| normalize_cell(cell)).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the cell at `column` of `row`, or an empty string for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    non_empty: usize,
    alpha: usize,
    numeral: usize,
}

impl RowStats {
    fn alpha_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.alpha as f64 / self.non_empty as f64
        }
    }
}

fn row_stats(row: &[String]) -> RowStats {
    let mut stats = RowStats::default();
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if trimmed.chars().any(|ch| ch.is_alphabetic()) {
            stats.alpha += 1;
        }
        if coerce_f64(trimmed).is_some() {
            stats.numeral += 1;
        }
    }
    stats
}

/// A data row has a numeral in its first cell and in most of its cells,
/// so `24 months,1,87.1 cm,0.035` counts while a title such as
/// `Height-for-age 0-2 years` does not.
fn is_data_like(row: &[String]) -> bool {
    let first_is_numeric = row.first().and_then(|cell| coerce_f64(cell)).is_some();
    let stats = row_stats(row);
    first_is_numeric && stats.non_empty >= 2 && stats.numeral * 2 > stats.non_empty
}

fn is_header_like(stats: RowStats) -> bool {
    stats.non_empty >= 2 && stats.alpha_ratio() >= 0.5
}

/// Picks the header row among the first few records.
///
/// The row directly above the first data row is the header when it is at
/// least as wide as that data row. Otherwise the last header-like row above
/// the data wins, then the row just above the data, then row 0.
fn detect_header_row(rows: &[Vec<String>]) -> usize {
    let window = rows.len().min(HEADER_SEARCH_ROWS);
    let data_index = rows.iter().take(window).position(|row| is_data_like(row));
    if let Some(idx) = data_index.filter(|&idx| idx > 0) {
        let above = row_stats(&rows[idx - 1]).non_empty;
        if above >= 2 && above >= row_stats(&rows[idx]).non_empty {
            return idx - 1;
        }
    }
    let search_end = data_index.unwrap_or(window);
    let header_like = (0..search_end)
        .rev()
        .find(|&idx| is_header_like(row_stats(&rows[idx])));
    match (header_like, data_index) {
        (Some(idx), _) => idx,
        (None, Some(idx)) if idx > 0 => idx - 1,
        _ => 0,
    }
}

/// Reads a reference file from disk.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_raw_table(file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses delimited text into a [`RawTable`].
///
/// Records may have differing lengths; short rows are padded with empty
/// cells and fully empty records are skipped.
pub fn parse_raw_table<R: Read>(input: R) -> std::result::Result<RawTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(RawTable::default());
    }
    let header_index = detect_header_row(&raw_rows);
    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let mut rows = Vec::with_capacity(raw_rows.len() - header_index - 1);
    for record in raw_rows.iter().skip(header_index + 1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_table() {
        let table = parse_raw_table("Month,L,M,S\n0,1,49.9,0.038\n1,1,54.7,0.036\n".as_bytes())
            .unwrap();
        assert_eq!(table.headers, vec!["Month", "L", "M", "S"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, 2), "54.7");
    }

    #[test]
    fn skips_title_rows_above_header() {
        let input = "Length-for-age BOYS\n\nMonth,L,M,S\n0,1,49.9,0.038\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Month", "L", "M", "S"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn numeric_header_row_is_kept_above_data() {
        let input = "Heights by Z\nMonth,-3,-2,-1,0,1,2,3\n0,44,46,48,50,52,54,56\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers[0], "Month");
        assert_eq!(table.headers[1], "-3");
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn data_rows_with_units_are_not_taken_as_header() {
        let input = "Age,L,M,S\n24 months,1,87.1 cm,0.035\n36 mo,1,96.1cm,0.037\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Age", "L", "M", "S"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 0), "24 months");
    }

    #[test]
    fn boundary_header_wins_over_two_cell_title() {
        let input = "Height-for-age,Girls\nMonth,-3,-2,-1,0,1,2,3\n0,43.6,45.4,47.3,49.1,51.0,52.9,54.7\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.headers[0], "Month");
        assert_eq!(table.headers[7], "3");
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn title_with_numerals_is_not_data() {
        let input = "Height-for-age 0-2 years\nMonth,L,M,S\n0,1,49.9,0.038\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Month", "L", "M", "S"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn pads_short_rows_and_strips_bom() {
        let input = "\u{feff}Month , L ,M,S\n0,1\n";
        let table = parse_raw_table(input.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Month", "L", "M", "S"]);
        assert_eq!(table.rows[0], vec!["0", "1", "", ""]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = parse_raw_table("\n\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
