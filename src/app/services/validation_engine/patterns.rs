//! Value-shape classification for text fields

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::constants::PATTERN_TOP_N;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s\-().]{7,}$").unwrap())
}

/// Classify one value into a coarse shape bucket
pub fn classify(value: &str) -> &'static str {
    let trimmed = value.trim();
    if trimmed.parse::<f64>().is_ok() {
        return "numeric";
    }
    if email_regex().is_match(trimmed) {
        return "email";
    }
    if phone_regex().is_match(trimmed) && trimmed.chars().filter(|c| c.is_ascii_digit()).count() >= 7
    {
        return "phone";
    }

    let has_upper = trimmed.chars().any(|c| c.is_uppercase());
    let has_lower = trimmed.chars().any(|c| c.is_lowercase());
    if has_upper && !has_lower {
        return "uppercase";
    }
    if has_lower && !has_upper {
        return "lowercase";
    }
    if is_title_case(trimmed) {
        return "title-case";
    }
    "mixed"
}

fn is_title_case(value: &str) -> bool {
    let mut saw_word = false;
    for word in value.split_whitespace() {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {
                if chars.any(|c| c.is_uppercase()) {
                    return false;
                }
            }
            _ => return false,
        }
        saw_word = true;
    }
    saw_word
}

/// Histogram of value shapes, most common first, truncated to the top
/// [`PATTERN_TOP_N`] buckets
pub fn histogram(values: &[&str]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for value in values {
        *counts.entry(classify(value)).or_insert(0) += 1;
    }

    let mut buckets: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(pattern, count)| (pattern.to_string(), count))
        .collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    buckets.truncate(PATTERN_TOP_N);
    buckets
}

/// Whether a field's values mix lowercase-only entries into an otherwise
/// mixed-case population beyond the given ratio
pub fn is_case_inconsistent(values: &[&str], ratio: f64) -> bool {
    if values.is_empty() {
        return false;
    }

    let lowercase_only = values
        .iter()
        .filter(|value| {
            value.chars().any(|c| c.is_lowercase()) && !value.chars().any(|c| c.is_uppercase())
        })
        .count();
    let has_mixed_case = values.iter().any(|value| value.chars().any(|c| c.is_uppercase()));

    has_mixed_case
        && lowercase_only > 0
        && (lowercase_only as f64 / values.len() as f64) > ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CASE_INCONSISTENCY_RATIO;

    #[test]
    fn test_classify_shapes() {
        assert_eq!(classify("42.5"), "numeric");
        assert_eq!(classify("ops@fuelco.com"), "email");
        assert_eq!(classify("(555) 123-4567"), "phone");
        assert_eq!(classify("ACME"), "uppercase");
        assert_eq!(classify("diesel"), "lowercase");
        assert_eq!(classify("Acme Fuel Co"), "title-case");
        assert_eq!(classify("McDonald x7"), "mixed");
    }

    #[test]
    fn test_histogram_orders_by_count() {
        let values = ["Acme", "Basin", "Cole", "DIESEL", "gas"];
        let buckets = histogram(&values);
        assert_eq!(buckets[0], ("title-case".to_string(), 3));
        assert_eq!(buckets.len(), 3);
    }

    #[test]
    fn test_case_inconsistency() {
        let inconsistent = ["Acme Fuel", "Basin Oil", "cole trucking"];
        assert!(is_case_inconsistent(&inconsistent, CASE_INCONSISTENCY_RATIO));

        let all_lower = ["acme", "basin"];
        assert!(!is_case_inconsistent(&all_lower, CASE_INCONSISTENCY_RATIO));

        let all_title = ["Acme", "Basin"];
        assert!(!is_case_inconsistent(&all_title, CASE_INCONSISTENCY_RATIO));
    }
}
