//! Row-by-row transformation of raw tables into typed records

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::app::models::{FieldMapping, FieldValue, ProcessedRecord, RawTable, SemanticField};
use crate::config::{ImportConfig, NumericPolicy};
use crate::constants::derived;

use super::coercion::{coerce_date, coerce_number, CoercedNumber};

/// Counters and diagnostics collected while transforming one table
#[derive(Debug, Clone, Default)]
pub struct TransformStats {
    /// Raw rows received from the parser
    pub rows_in: usize,

    /// Records emitted
    pub rows_out: usize,

    /// Fully-empty rows dropped
    pub rows_dropped: usize,

    /// Unparseable date cells per effective header
    pub invalid_dates: HashMap<String, usize>,

    /// Unparseable numeric cells per effective header
    pub invalid_numbers: HashMap<String, usize>,

    /// Human-readable notes about dropped or degraded rows
    pub diagnostics: Vec<String>,
}

impl TransformStats {
    /// Total unparseable cells across all fields
    pub fn invalid_cell_count(&self) -> usize {
        self.invalid_dates.values().sum::<usize>() + self.invalid_numbers.values().sum::<usize>()
    }
}

/// A transformed table: typed records plus their effective headers
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Effective headers: mapped columns renamed to canonical field names,
    /// unmapped columns kept verbatim, derived fields appended
    pub headers: Vec<String>,

    /// One typed record per surviving raw row
    pub records: Vec<ProcessedRecord>,

    pub stats: TransformStats,
}

/// Service for converting raw string grids into typed records
pub struct RecordTransformer;

impl RecordTransformer {
    /// Transform a parsed table under a resolved mapping.
    ///
    /// Mapped columns are renamed to their canonical field names and their
    /// cells coerced by field kind; unmapped columns pass through as text
    /// under their original names. Fully-empty rows are dropped. Derived
    /// fields are appended when the mapping makes them computable.
    pub fn transform(
        table: &RawTable,
        mapping: &FieldMapping,
        config: &ImportConfig,
    ) -> TransformResult {
        let mut stats = TransformStats {
            rows_in: table.row_count(),
            ..Default::default()
        };

        let derive_margin = mapping.column_for(SemanticField::Sales).is_some()
            && mapping
                .column_for(SemanticField::ActualProfitByItem)
                .is_some();
        let derive_revenue_per_gallon = mapping.column_for(SemanticField::Sales).is_some()
            && mapping.column_for(SemanticField::GallonQty).is_some();

        let mut headers: Vec<String> = table
            .headers
            .iter()
            .map(|name| Self::effective_header(name, mapping))
            .collect();
        if derive_margin {
            headers.push(derived::PROFIT_MARGIN.to_string());
        }
        if derive_revenue_per_gallon {
            headers.push(derived::REVENUE_PER_GALLON.to_string());
        }

        let mut records = Vec::with_capacity(table.row_count());
        for (row_index, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                stats.rows_dropped += 1;
                stats
                    .diagnostics
                    .push(format!("Row {} is empty; row dropped", row_index + 1));
                debug!("Dropping empty row {}", row_index + 1);
                continue;
            }

            let mut record = ProcessedRecord::new();
            for (column_index, cell) in row.iter().enumerate() {
                let source_name = &table.headers[column_index];
                let header = &headers[column_index];
                let value = Self::coerce_cell(
                    cell,
                    mapping.field_for(source_name),
                    header,
                    config.numeric_policy,
                    &mut stats,
                );
                record.insert(header.clone(), value);
            }

            if derive_margin {
                record.insert(derived::PROFIT_MARGIN, Self::profit_margin(&record));
            }
            if derive_revenue_per_gallon {
                record.insert(
                    derived::REVENUE_PER_GALLON,
                    Self::revenue_per_gallon(&record),
                );
            }

            records.push(record);
        }

        stats.rows_out = records.len();
        if stats.invalid_cell_count() > 0 {
            warn!(
                "Transformation found {} unparseable cell(s)",
                stats.invalid_cell_count()
            );
        }
        info!(
            "Transformed {} row(s) into {} record(s) ({} dropped)",
            stats.rows_in, stats.rows_out, stats.rows_dropped
        );

        TransformResult {
            headers,
            records,
            stats,
        }
    }

    fn effective_header(source_name: &str, mapping: &FieldMapping) -> String {
        match mapping.field_for(source_name) {
            Some(field) => field.display_name().to_string(),
            None => source_name.to_string(),
        }
    }

    fn coerce_cell(
        cell: &str,
        field: Option<SemanticField>,
        header: &str,
        policy: NumericPolicy,
        stats: &mut TransformStats,
    ) -> FieldValue {
        match field {
            Some(field) if field.is_date() => match coerce_date(cell) {
                Some(date) => FieldValue::Date(date),
                None if cell.trim().is_empty() => FieldValue::Null,
                None => {
                    *stats.invalid_dates.entry(header.to_string()).or_insert(0) += 1;
                    FieldValue::Null
                }
            },
            Some(field) if field.is_numeric() => match coerce_number(cell) {
                CoercedNumber::Value(value) => FieldValue::Number(value),
                CoercedNumber::Empty => match policy {
                    NumericPolicy::CoerceToZero => FieldValue::Number(0.0),
                    NumericPolicy::Strict => FieldValue::Null,
                },
                CoercedNumber::Invalid => {
                    *stats
                        .invalid_numbers
                        .entry(header.to_string())
                        .or_insert(0) += 1;
                    match policy {
                        NumericPolicy::CoerceToZero => FieldValue::Number(0.0),
                        NumericPolicy::Strict => FieldValue::Null,
                    }
                }
            },
            _ => {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::Text(trimmed.to_string())
                }
            }
        }
    }

    /// Profit margin in percent, null when sales is zero or either input
    /// is missing
    fn profit_margin(record: &ProcessedRecord) -> FieldValue {
        let sales = record.number(SemanticField::Sales.display_name());
        let profit = record.number(SemanticField::ActualProfitByItem.display_name());
        match (sales, profit) {
            (Some(sales), Some(profit)) if sales != 0.0 => {
                FieldValue::Number(profit / sales * 100.0)
            }
            _ => FieldValue::Null,
        }
    }

    /// Revenue per gallon, null when gallons is zero or either input is
    /// missing
    fn revenue_per_gallon(record: &ProcessedRecord) -> FieldValue {
        let sales = record.number(SemanticField::Sales.display_name());
        let gallons = record.number(SemanticField::GallonQty.display_name());
        match (sales, gallons) {
            (Some(sales), Some(gallons)) if gallons != 0.0 => {
                FieldValue::Number(sales / gallons)
            }
            _ => FieldValue::Null,
        }
    }
}
