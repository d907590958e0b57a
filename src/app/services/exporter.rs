//! Delimited-text export
//!
//! Serializes processed records back to delimited text. Dates are written
//! in the canonical `YYYY-MM-DD` form and the CSV writer quotes any value
//! containing the delimiter or quote character, doubling embedded quotes.

use tracing::info;

use crate::app::models::{Dataset, ProcessedRecord};
use crate::{Error, Result};

/// Service serializing records back to delimited text
pub struct DelimitedExporter;

impl DelimitedExporter {
    /// Export a dataset's records under its headers
    pub fn export(dataset: &Dataset, delimiter: u8) -> Result<String> {
        Self::export_records(&dataset.headers, &dataset.records, delimiter)
    }

    /// Export records under the given headers. Fields a record lacks are
    /// written as empty cells, so every output row has the same width.
    pub fn export_records(
        headers: &[String],
        records: &[ProcessedRecord],
        delimiter: u8,
    ) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(headers)?;
        for record in records {
            let row: Vec<String> = headers
                .iter()
                .map(|header| {
                    record
                        .get(header)
                        .map(|value| value.to_export_string())
                        .unwrap_or_default()
                })
                .collect();
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|error| Error::io("Failed to flush export buffer", error.into_error()))?;
        let text = String::from_utf8(bytes)
            .map_err(|error| Error::parse(format!("Export produced invalid UTF-8: {}", error)))?;

        info!(
            "Exported {} record(s) across {} field(s)",
            records.len(),
            headers.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FieldValue;
    use chrono::NaiveDate;

    fn record(cells: &[(&str, FieldValue)]) -> ProcessedRecord {
        let mut record = ProcessedRecord::new();
        for (header, value) in cells {
            record.insert(*header, value.clone());
        }
        record
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_export_canonical_dates_and_empty_nulls() {
        let headers = headers(&["Date", "Sales", "Notes"]);
        let records = vec![record(&[
            (
                "Date",
                FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ),
            ("Sales", FieldValue::Number(100.5)),
            ("Notes", FieldValue::Null),
        ])];

        let text = DelimitedExporter::export_records(&headers, &records, b',').unwrap();
        assert_eq!(text, "Date,Sales,Notes\n2024-01-15,100.5,\n");
    }

    #[test]
    fn test_export_quotes_embedded_delimiters_and_doubles_quotes() {
        let headers = headers(&["Customer"]);
        let records = vec![
            record(&[(
                "Customer",
                FieldValue::Text("Acme, Inc.".to_string()),
            )]),
            record(&[(
                "Customer",
                FieldValue::Text("Bob's \"Best\" Fuel".to_string()),
            )]),
        ];

        let text = DelimitedExporter::export_records(&headers, &records, b',').unwrap();
        assert_eq!(
            text,
            "Customer\n\"Acme, Inc.\"\n\"Bob's \"\"Best\"\" Fuel\"\n"
        );
    }

    #[test]
    fn test_export_fills_missing_fields_with_empty_cells() {
        let headers = headers(&["Date", "Sales"]);
        let records = vec![record(&[("Sales", FieldValue::Number(10.0))])];

        let text = DelimitedExporter::export_records(&headers, &records, b',').unwrap();
        assert_eq!(text, "Date,Sales\n,10\n");
    }
}
