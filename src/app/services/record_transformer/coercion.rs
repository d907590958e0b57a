//! Scalar coercion for dates and numbers
//!
//! Shared by the transformer (converting cells into typed values) and the
//! schema profiler (deciding whether a sample value reads as a date).

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::constants::{
    GENERIC_DATETIME_FORMATS, GENERIC_DATE_FORMATS, MAX_DATE_YEAR, MIN_DATE_YEAR, US_DATE_FORMAT,
};

/// Outcome of numeric coercion for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoercedNumber {
    /// Cell parsed to a finite number
    Value(f64),

    /// Cell was empty or an explicit null marker
    Empty,

    /// Cell held text that does not parse numerically
    Invalid,
}

/// Parse a raw cell into a calendar date.
///
/// Generic ISO-style formats are tried first, bounded to plausible years
/// so that stray numeric strings do not read as dates. The US numeric
/// format is tried last without the year bound, letting genuinely ancient
/// or far-future dates survive into validation where they are flagged
/// rather than silently dropped.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in GENERIC_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            let date = parsed.date();
            if plausible_year(date) {
                return Some(date);
            }
        }
    }

    for format in GENERIC_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if plausible_year(date) {
                return Some(date);
            }
        }
    }

    NaiveDate::parse_from_str(trimmed, US_DATE_FORMAT).ok()
}

fn plausible_year(date: NaiveDate) -> bool {
    (MIN_DATE_YEAR..MAX_DATE_YEAR).contains(&date.year())
}

/// Parse a raw cell into a number, tolerating currency symbols, thousands
/// separators, and embedded whitespace. Empty cells and the literal null
/// markers some exports emit are distinguished from genuinely invalid text
/// so callers can count data-quality problems separately.
pub fn coerce_number(raw: &str) -> CoercedNumber {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("undefined")
    {
        return CoercedNumber::Empty;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | '£' | '€' | ',') && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => CoercedNumber::Value(value),
        _ => CoercedNumber::Invalid,
    }
}
