//! Column type inference over a bounded value sample
//!
//! Types are tried in a fixed priority order (currency, number, date,
//! text), each requiring at least 70% of the sampled values to match. A
//! bare integer like "50" deliberately counts as a number rather than a
//! currency so quantity columns do not masquerade as monetary ones; a
//! value reads as currency when it carries a currency symbol or a short
//! decimal fraction with optional thousands grouping.

use std::sync::OnceLock;

use regex::Regex;

use crate::app::models::ColumnType;
use crate::app::services::record_transformer::coercion::coerce_date;
use crate::constants::TYPE_MATCH_RATIO;

fn currency_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Symbol-prefixed amount, or a plain amount with a 1-2 digit
        // decimal fraction (the common money shape)
        Regex::new(r"^(?:[$£€]\s*-?\d[\d,]*(?:\.\d+)?|-?\d[\d,]*\.\d{1,2})$").unwrap()
    })
}

/// Check whether a value reads as a currency amount
pub fn is_currency(value: &str) -> bool {
    currency_regex().is_match(value.trim())
}

/// Check whether a value parses fully as a finite number
pub fn is_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Check whether a value parses as a calendar date
pub fn is_date(value: &str) -> bool {
    coerce_date(value).is_some()
}

/// Infer the type of a column from its sampled non-empty values.
///
/// An empty sample yields text.
pub fn infer_column_type(samples: &[String]) -> ColumnType {
    if samples.is_empty() {
        return ColumnType::Text;
    }

    let total = samples.len() as f64;
    let ratio_of = |pred: fn(&str) -> bool| {
        samples.iter().filter(|value| pred(value)).count() as f64 / total
    };

    if ratio_of(is_currency) >= TYPE_MATCH_RATIO {
        ColumnType::Currency
    } else if ratio_of(is_number) >= TYPE_MATCH_RATIO {
        ColumnType::Number
    } else if ratio_of(is_date) >= TYPE_MATCH_RATIO {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}
