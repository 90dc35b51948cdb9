// src/process/utils.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Cell texts the source uses to say "no observation".
pub const NO_DATA_MARKERS: &[&str] = &["", "-", "–", "—", "..", "?", "n/a", "N/A", "NA"];

/// Plain decimal: optional sign, digits, optional fraction. The integer part
/// may group thousands with commas, but only in threes. Rejects `inf`, `NaN`
/// and exponents, all of which `f64::from_str` would accept.
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d*)?|\.\d+)$").expect("decimal regex")
});

/// Outcome of reading one numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    NoData,
    Invalid,
}

impl Numeric {
    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(v),
            Numeric::NoData | Numeric::Invalid => None,
        }
    }
}

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop one trailing `%`, if there is one.
pub fn strip_percent(raw: &str) -> &str {
    raw.strip_suffix('%').unwrap_or(raw)
}

/// Parse a cell as a decimal number.
///
/// Thousands separators are removed once their grouping is checked, and the
/// typographic minus (U+2212) used on Wikipedia is read as `-`. Empty cells and the markers in
/// [`NO_DATA_MARKERS`] are `NoData`, never zero.
pub fn parse_decimal(raw: &str) -> Numeric {
    let cleaned = clean_str(raw);
    if NO_DATA_MARKERS.contains(&cleaned.as_str()) {
        return Numeric::NoData;
    }

    let normalized = cleaned.replace('\u{2212}', "-");
    if !DECIMAL.is_match(&normalized) {
        return Numeric::Invalid;
    }
    normalized
        .replace(',', "")
        .parse::<f64>()
        .map(Numeric::Value)
        .unwrap_or(Numeric::Invalid)
}
