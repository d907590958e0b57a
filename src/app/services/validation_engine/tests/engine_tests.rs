//! End-to-end tests for the validation engine

use chrono::NaiveDate;

use crate::app::models::{ColumnType, FieldValue, Severity};
use crate::app::services::record_transformer::TransformStats;
use crate::app::services::validation_engine::ValidationEngine;
use crate::config::ValidationConfig;

use super::{headers, records_from};

fn engine() -> ValidationEngine {
    ValidationEngine::new(ValidationConfig::default())
}

fn date(year: i32, month: u32, day: u32) -> FieldValue {
    FieldValue::Date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

fn clean_records() -> Vec<crate::app::models::ProcessedRecord> {
    records_from(
        &["Date", "Sales", "Gallon Qty"],
        vec![
            vec![date(2024, 1, 5), FieldValue::Number(100.0), FieldValue::Number(50.0)],
            vec![date(2024, 1, 6), FieldValue::Number(80.0), FieldValue::Number(20.0)],
        ],
    )
}

#[test]
fn test_clean_dataset_has_no_errors_and_full_completeness() {
    let records = clean_records();
    let report = engine().validate(
        &records,
        &headers(&["Date", "Sales", "Gallon Qty"]),
        &TransformStats::default(),
    );

    assert!(!report.has_errors());
    assert_eq!(report.quality.completeness, 100);
    assert_eq!(report.quality.consistency, 100);
    assert_eq!(report.quality.overall, 100);
    assert_eq!(
        report.field_analysis["Sales"].data_type,
        Some(ColumnType::Number)
    );
}

#[test]
fn test_empty_dataset_is_an_error() {
    let report = engine().validate(&[], &headers(&["Date", "Sales"]), &TransformStats::default());

    assert!(report.has_errors());
    assert_eq!(report.quality.overall, 0);
}

#[test]
fn test_missing_required_header_reported() {
    let records = records_from(
        &["Sales"],
        vec![vec![FieldValue::Number(10.0)], vec![FieldValue::Number(20.0)]],
    );
    let report = engine().validate(&records, &headers(&["Sales"]), &TransformStats::default());

    assert!(report
        .errors
        .iter()
        .any(|issue| issue.message.contains("'Date' is missing")));
}

#[test]
fn test_invalid_number_counts_become_errors() {
    let records = clean_records();
    let mut stats = TransformStats::default();
    stats.invalid_numbers.insert("Sales".to_string(), 1);

    let report = engine().validate(
        &records,
        &headers(&["Date", "Sales", "Gallon Qty"]),
        &stats,
    );

    let issue = report
        .errors
        .iter()
        .find(|issue| issue.field.as_deref() == Some("Sales"))
        .unwrap();
    assert_eq!(issue.severity, Severity::High);
    assert!(issue.message.contains("could not be parsed as numbers"));
    assert!(report.field_analysis["Sales"]
        .issues
        .contains(&"invalid numbers".to_string()));
}

#[test]
fn test_completely_empty_field_is_high_severity() {
    let records = records_from(
        &["Date", "Sales", "Driver"],
        vec![
            vec![date(2024, 1, 5), FieldValue::Number(100.0), FieldValue::Null],
            vec![date(2024, 1, 6), FieldValue::Number(80.0), FieldValue::Null],
        ],
    );
    let report = engine().validate(
        &records,
        &headers(&["Date", "Sales", "Driver"]),
        &TransformStats::default(),
    );

    assert!(report
        .errors
        .iter()
        .any(|issue| issue.field.as_deref() == Some("Driver")
            && issue.message.contains("completely empty")));
    assert_eq!(report.field_analysis["Driver"].data_type, None);
}

#[test]
fn test_low_completeness_is_a_warning_not_an_error() {
    let mut rows = vec![vec![date(2024, 1, 5), FieldValue::Text("A1".to_string())]];
    for day in 6..=14 {
        rows.push(vec![date(2024, 1, day), FieldValue::Null]);
    }
    let records = records_from(&["Date", "Driver"], rows);

    let report = engine().validate(
        &records,
        &headers(&["Date", "Driver"]),
        &TransformStats::default(),
    );

    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.field.as_deref() == Some("Driver")
            && issue.message.contains("complete")));
}

#[test]
fn test_financial_outlier_flagged() {
    let rows = [10.0, 12.0, 11.0, 9.0, 1000.0]
        .iter()
        .map(|value| vec![FieldValue::Number(*value)])
        .collect();
    let records = records_from(&["Sales"], rows);

    let report = engine().validate(&records, &headers(&["Sales"]), &TransformStats::default());

    assert_eq!(report.field_analysis["Sales"].outliers, vec![1000.0]);
    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.message.contains("interquartile")));
}

#[test]
fn test_negative_gallons_warned() {
    let records = records_from(
        &["Gallon Qty"],
        vec![
            vec![FieldValue::Number(10.0)],
            vec![FieldValue::Number(-5.0)],
        ],
    );

    let report = engine().validate(
        &records,
        &headers(&["Gallon Qty"]),
        &TransformStats::default(),
    );

    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.message.contains("negative")));
}

#[test]
fn test_duplicate_identifier_values_warned() {
    let records = records_from(
        &["Invoice Number"],
        vec![
            vec![FieldValue::Text("INV-1".to_string())],
            vec![FieldValue::Text("INV-1".to_string())],
            vec![FieldValue::Text("INV-2".to_string())],
        ],
    );

    let report = engine().validate(
        &records,
        &headers(&["Invoice Number"]),
        &TransformStats::default(),
    );

    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.message.contains("duplicate")));
}

#[test]
fn test_future_and_ancient_dates_warned() {
    let records = records_from(
        &["Date"],
        vec![vec![date(2024, 1, 5)], vec![date(2199, 1, 5)], vec![date(1850, 1, 5)]],
    );

    let report = engine().validate(&records, &headers(&["Date"]), &TransformStats::default());

    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.message.contains("beyond year")));
    assert!(report
        .warnings
        .iter()
        .any(|issue| issue.message.contains("before year")));
}

#[test]
fn test_profit_mismatch_warned_per_row() {
    let records = records_from(
        &["Sales", "Actual Cost by item", "Actual Profit By Item"],
        vec![
            vec![
                FieldValue::Number(100.0),
                FieldValue::Number(60.0),
                FieldValue::Number(40.0),
            ],
            vec![
                FieldValue::Number(100.0),
                FieldValue::Number(60.0),
                FieldValue::Number(55.0),
            ],
        ],
    );

    let report = engine().validate(
        &records,
        &headers(&["Sales", "Actual Cost by item", "Actual Profit By Item"]),
        &TransformStats::default(),
    );

    let mismatches: Vec<_> = report
        .warnings
        .iter()
        .filter(|issue| issue.message.contains("differs from sales"))
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].row, Some(1));
}

#[test]
fn test_case_inconsistency_suggested_for_customer() {
    let rows = vec![
        vec![FieldValue::Text("Acme Fuel".to_string())],
        vec![FieldValue::Text("Basin Oil".to_string())],
        vec![FieldValue::Text("cole trucking".to_string())],
    ];
    let records = records_from(&["Customer"], rows);

    let report = engine().validate(
        &records,
        &headers(&["Customer"]),
        &TransformStats::default(),
    );

    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].severity, Severity::Low);
    assert!(!report.field_analysis["Customer"].patterns.is_empty());
}
