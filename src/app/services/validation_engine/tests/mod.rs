//! Tests for the validation engine

mod engine_tests;

use crate::app::models::{FieldValue, ProcessedRecord};

/// Build records by zipping each row of values against the headers
pub fn records_from(headers: &[&str], rows: Vec<Vec<FieldValue>>) -> Vec<ProcessedRecord> {
    rows.into_iter()
        .map(|row| {
            let mut record = ProcessedRecord::new();
            for (header, value) in headers.iter().zip(row) {
                record.insert(*header, value);
            }
            record
        })
        .collect()
}

pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
