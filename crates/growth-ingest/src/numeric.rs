//! Numeric coercion for reference table cells.

use std::sync::LazyLock;

use regex::Regex;

static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)").expect("numeral pattern is valid")
});

/// Parses a string as f64, returning None for invalid, empty or non-finite strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns the first decimal numeral embedded in `value`, if any.
///
/// `"12 months"` gives 12, `"110.5cm"` gives 110.5, `"Month"` gives None.
pub fn extract_numeral(value: &str) -> Option<f64> {
    NUMERAL
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a cell directly, falling back to the first embedded numeral.
pub fn coerce_f64(value: &str) -> Option<f64> {
    parse_f64(value).or_else(|| extract_numeral(value))
}
