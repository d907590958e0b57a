//! Single-pass per-field analysis

use std::collections::HashSet;

use chrono::{Datelike, Utc};

use crate::app::models::{
    ColumnType, FieldAnalysis, FieldValue, ProcessedRecord, Severity, ValidationIssue,
};
use crate::config::ValidationConfig;
use crate::constants::{
    is_financial_field, is_identifier_field, is_name_like_field, is_non_negative_field,
    MIN_DATE_YEAR,
};

use super::{outliers, patterns};

/// Findings for one field: the analysis record plus issues bucketed by
/// severity, ready to merge into a report
#[derive(Debug, Default)]
pub struct FieldFindings {
    pub analysis: FieldAnalysis,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<ValidationIssue>,
}

/// Analyze one field across all records.
///
/// `invalid_dates` and `invalid_numbers` are the transformer's unparseable
/// cell counts for this field; they surface here as errors because the
/// coerced values no longer betray the original text.
pub fn analyze_field(
    header: &str,
    records: &[ProcessedRecord],
    invalid_dates: usize,
    invalid_numbers: usize,
    config: &ValidationConfig,
) -> FieldFindings {
    let mut findings = FieldFindings::default();
    let analysis = &mut findings.analysis;
    analysis.total = records.len();

    let mut dates = Vec::new();
    let mut numbers = Vec::new();
    let mut texts: Vec<&str> = Vec::new();
    let mut distinct: HashSet<String> = HashSet::new();

    for record in records {
        match record.get(header) {
            Some(FieldValue::Date(date)) => {
                dates.push(*date);
                distinct.insert(date.to_string());
            }
            Some(FieldValue::Number(value)) => {
                numbers.push(*value);
                distinct.insert(value.to_string());
            }
            Some(FieldValue::Text(text)) if !text.is_empty() => {
                texts.push(text);
                distinct.insert(text.clone());
            }
            _ => analysis.empty += 1,
        }
    }

    let non_empty = analysis.total - analysis.empty;
    analysis.unique = distinct.len();
    analysis.data_type = dominant_type(dates.len(), numbers.len(), texts.len());

    if analysis.total > 0 && non_empty == 0 {
        analysis.issues.push("completely empty".to_string());
        findings.errors.push(ValidationIssue::field_issue(
            Severity::High,
            header,
            format!("Field '{}' is completely empty", header),
        ));
    } else if analysis.completeness() < config.completeness_warn_ratio {
        analysis.issues.push("low completeness".to_string());
        findings.warnings.push(ValidationIssue::field_issue(
            Severity::Medium,
            header,
            format!(
                "Field '{}' is only {:.0}% complete ({} of {} values present)",
                header,
                analysis.completeness() * 100.0,
                non_empty,
                analysis.total
            ),
        ));
    }

    if is_identifier_field(header) && analysis.unique < non_empty {
        analysis.issues.push("duplicate values".to_string());
        findings.warnings.push(ValidationIssue::field_issue(
            Severity::Medium,
            header,
            format!(
                "Field '{}' has {} duplicate value(s)",
                header,
                non_empty - analysis.unique
            ),
        ));
    }

    if invalid_dates > 0 {
        analysis.issues.push("invalid dates".to_string());
        findings.errors.push(ValidationIssue::field_issue(
            Severity::High,
            header,
            format!(
                "{} value(s) in '{}' could not be parsed as dates",
                invalid_dates, header
            ),
        ));
    }
    if invalid_numbers > 0 {
        analysis.issues.push("invalid numbers".to_string());
        findings.errors.push(ValidationIssue::field_issue(
            Severity::High,
            header,
            format!(
                "{} value(s) in '{}' could not be parsed as numbers",
                invalid_numbers, header
            ),
        ));
    }

    analyze_dates(header, &dates, config, &mut findings);
    analyze_numbers(header, &numbers, config, &mut findings);
    analyze_texts(header, &texts, config, &mut findings);

    findings
}

fn dominant_type(dates: usize, numbers: usize, texts: usize) -> Option<ColumnType> {
    if dates == 0 && numbers == 0 && texts == 0 {
        return None;
    }
    if dates >= numbers && dates >= texts {
        Some(ColumnType::Date)
    } else if numbers >= texts {
        Some(ColumnType::Number)
    } else {
        Some(ColumnType::Text)
    }
}

fn analyze_dates(
    header: &str,
    dates: &[chrono::NaiveDate],
    config: &ValidationConfig,
    findings: &mut FieldFindings,
) {
    if dates.is_empty() {
        return;
    }

    let future_cutoff = Utc::now().year() + config.future_year_slack;
    let future = dates.iter().filter(|date| date.year() > future_cutoff).count();
    let ancient = dates.iter().filter(|date| date.year() < MIN_DATE_YEAR).count();

    if future > 0 {
        findings.analysis.issues.push("future dates".to_string());
        findings.warnings.push(ValidationIssue::field_issue(
            Severity::Medium,
            header,
            format!("{} date(s) in '{}' are beyond year {}", future, header, future_cutoff),
        ));
    }
    if ancient > 0 {
        findings.analysis.issues.push("ancient dates".to_string());
        findings.warnings.push(ValidationIssue::field_issue(
            Severity::Medium,
            header,
            format!("{} date(s) in '{}' are before year {}", ancient, header, MIN_DATE_YEAR),
        ));
    }
}

fn analyze_numbers(
    header: &str,
    numbers: &[f64],
    config: &ValidationConfig,
    findings: &mut FieldFindings,
) {
    if numbers.is_empty() {
        return;
    }

    if is_financial_field(header) {
        let detected =
            outliers::detect_outliers(numbers, config.iqr_multiplier, config.outlier_min_sample);
        if !detected.is_empty() {
            findings.analysis.issues.push("outliers".to_string());
            findings.warnings.push(ValidationIssue::field_issue(
                Severity::Medium,
                header,
                format!(
                    "{} value(s) in '{}' fall outside the interquartile fences",
                    detected.len(),
                    header
                ),
            ));
            findings.analysis.outliers = detected;
        }
    }

    if is_non_negative_field(header) {
        let negatives = numbers.iter().filter(|value| **value < 0.0).count();
        if negatives > 0 {
            findings.analysis.issues.push("negative values".to_string());
            findings.warnings.push(ValidationIssue::field_issue(
                Severity::Medium,
                header,
                format!("{} negative value(s) in '{}'", negatives, header),
            ));
        }
    }
}

fn analyze_texts(
    header: &str,
    texts: &[&str],
    config: &ValidationConfig,
    findings: &mut FieldFindings,
) {
    if texts.is_empty() {
        return;
    }

    findings.analysis.patterns = patterns::histogram(texts);

    if is_name_like_field(header)
        && patterns::is_case_inconsistent(texts, config.case_inconsistency_ratio)
    {
        findings.analysis.issues.push("case inconsistency".to_string());
        findings.suggestions.push(ValidationIssue::field_issue(
            Severity::Low,
            header,
            format!(
                "Field '{}' mixes lowercase-only entries into mixed-case values; consider normalizing",
                header
            ),
        ));
    }
}
