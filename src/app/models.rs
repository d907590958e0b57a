//! Data models for the fuelbook import pipeline
//!
//! This module contains the core data structures for raw tabular input,
//! column profiles and field mappings, processed records, datasets, and
//! validation reports.

use crate::constants::{self, fields};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Semantic Fields
// =============================================================================

/// The fixed set of semantic fields that imported columns are normalized
/// into. Unmapped source columns pass through under their original name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticField {
    Date,
    Sales,
    GallonQty,
    ActualProfitByItem,
    ActualCostByItem,
    Customer,
    Driver,
    ProductType,
    Location,
}

impl SemanticField {
    /// All semantic fields in canonical order
    pub fn all() -> &'static [SemanticField] {
        &[
            SemanticField::Date,
            SemanticField::Sales,
            SemanticField::GallonQty,
            SemanticField::ActualProfitByItem,
            SemanticField::ActualCostByItem,
            SemanticField::Customer,
            SemanticField::Driver,
            SemanticField::ProductType,
            SemanticField::Location,
        ]
    }

    /// Fields that must be mapped before a dataset may be built
    pub fn required() -> &'static [SemanticField] {
        &[
            SemanticField::Date,
            SemanticField::Sales,
            SemanticField::GallonQty,
        ]
    }

    /// Canonical display name, used as the effective header after mapping
    pub fn display_name(&self) -> &'static str {
        match self {
            SemanticField::Date => fields::DATE,
            SemanticField::Sales => fields::SALES,
            SemanticField::GallonQty => fields::GALLON_QTY,
            SemanticField::ActualProfitByItem => fields::PROFIT,
            SemanticField::ActualCostByItem => fields::COST,
            SemanticField::Customer => fields::CUSTOMER,
            SemanticField::Driver => fields::DRIVER,
            SemanticField::ProductType => fields::PRODUCT_TYPE,
            SemanticField::Location => fields::LOCATION,
        }
    }

    /// Whether values for this field are coerced to calendar dates
    pub fn is_date(&self) -> bool {
        matches!(self, SemanticField::Date)
    }

    /// Whether values for this field are coerced numerically
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticField::Sales
                | SemanticField::GallonQty
                | SemanticField::ActualProfitByItem
                | SemanticField::ActualCostByItem
        )
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SemanticField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SemanticField::all()
            .iter()
            .find(|field| field.display_name().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| format!("Unknown semantic field: '{}'", s))
    }
}

// =============================================================================
// Column Types and Profiles
// =============================================================================

/// Data type inferred for a source column during profiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Date,
    Currency,
    Number,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Date => "date",
            ColumnType::Currency => "currency",
            ColumnType::Number => "number",
            ColumnType::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// Profile of one source column, built once per import from a bounded
/// sample of its values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Source column name as it appears in the header row
    pub name: String,

    /// Positional index of the column (duplicate names tolerated)
    pub index: usize,

    /// Inferred data type for the column
    pub inferred_type: ColumnType,

    /// First non-empty sample values used for inference
    pub sample_values: Vec<String>,

    /// Suggested semantic field, absent when no rule matched
    pub suggested_field: Option<SemanticField>,

    /// Heuristic confidence in the suggestion, within [0, 1]; advisory only
    pub confidence: f64,
}

// =============================================================================
// Raw Table
// =============================================================================

/// A parsed grid of string cells: one header row plus data rows with
/// positional correspondence to the headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Ordered source column names; uniqueness is not guaranteed
    pub headers: Vec<String>,

    /// Data rows, each with exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Number of source columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Field Mapping
// =============================================================================

/// Mapping from source column names to semantic fields.
///
/// Invariant: at most one source column maps to each semantic field. A
/// later insert for an already-claimed field releases the earlier column
/// (last write wins, matching interactive remapping).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    by_column: HashMap<String, SemanticField>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a source column to a semantic field, releasing any column that
    /// previously claimed the same field.
    pub fn insert(&mut self, column: impl Into<String>, field: SemanticField) {
        let column = column.into();
        self.by_column.retain(|_, mapped| *mapped != field);
        self.by_column.insert(column, field);
    }

    /// Semantic field a source column maps to, if any
    pub fn field_for(&self, column: &str) -> Option<SemanticField> {
        self.by_column.get(column).copied()
    }

    /// Source column mapped to a semantic field, if any
    pub fn column_for(&self, field: SemanticField) -> Option<&str> {
        self.by_column
            .iter()
            .find(|(_, mapped)| **mapped == field)
            .map(|(column, _)| column.as_str())
    }

    /// Required semantic fields not yet claimed by any column, in canonical
    /// order
    pub fn missing_required(&self) -> Vec<SemanticField> {
        SemanticField::required()
            .iter()
            .filter(|field| self.column_for(**field).is_none())
            .copied()
            .collect()
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    /// Iterate over (column, field) pairs; ordering is unspecified
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SemanticField)> {
        self.by_column.iter()
    }
}

// =============================================================================
// Field Values and Processed Records
// =============================================================================

/// A typed cell value after coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Date(NaiveDate),
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Whether the value carries no information
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Canonical string form for export: dates as `YYYY-MM-DD`, nulls as
    /// the empty string.
    pub fn to_export_string(&self) -> String {
        match self {
            FieldValue::Date(date) => date.format(constants::CANONICAL_DATE_FORMAT).to_string(),
            FieldValue::Number(value) => format!("{}", value),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Null => String::new(),
        }
    }
}

/// One imported row after mapping and coercion: effective field name to
/// typed value, plus derived fields where their inputs were present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    values: HashMap<String, FieldValue>,
}

impl ProcessedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Numeric value of a field, if present and numeric
    pub fn number(&self, field: &str) -> Option<f64> {
        self.values.get(field).and_then(FieldValue::as_number)
    }

    /// Date value of a field, if present and a date
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.values.get(field).and_then(FieldValue::as_date)
    }

    /// Text value of a field, if present and textual
    pub fn text(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(FieldValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Dataset and Summary Statistics
// =============================================================================

/// Aggregate totals, derived ratios, and cardinalities over a dataset's
/// records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_gallons: f64,
    pub total_profit: f64,
    pub total_cost: f64,
    pub avg_profit_margin: f64,
    pub avg_revenue_per_gallon: f64,
    pub unique_customers: usize,
    pub unique_product_types: usize,
}

/// A fully imported dataset. Built once, atomically, and only ever replaced
/// wholesale by re-running the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// User-visible dataset name, also the registry key
    pub name: String,

    /// Effective field names after mapping, in source column order, with
    /// derived field names appended
    pub headers: Vec<String>,

    /// Transformed records
    pub records: Vec<ProcessedRecord>,

    /// Aggregate summary over `records`
    pub summary: SummaryStatistics,

    /// Import completion time
    pub uploaded_at: DateTime<Utc>,

    /// Human-readable origin, e.g. the uploaded file name
    pub source_description: String,
}

impl Dataset {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Anything that can hand out processed records for aggregation.
///
/// Downstream helpers take this single accessor instead of sniffing for
/// dataset-shaped or service-shaped objects.
pub trait RecordSource {
    fn records(&self) -> &[ProcessedRecord];
}

impl RecordSource for Dataset {
    fn records(&self) -> &[ProcessedRecord] {
        &self.records
    }
}

impl RecordSource for [ProcessedRecord] {
    fn records(&self) -> &[ProcessedRecord] {
        self
    }
}

impl RecordSource for Vec<ProcessedRecord> {
    fn records(&self) -> &[ProcessedRecord] {
        self
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        write!(f, "{}", name)
    }
}

/// A single validation finding, classified by severity and optionally
/// pinned to a field and/or record index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    pub fn field_issue(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: Some(field.into()),
            row: None,
            message: message.into(),
        }
    }

    pub fn row_issue(
        severity: Severity,
        field: impl Into<String>,
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: Some(field.into()),
            row: Some(row),
            message: message.into(),
        }
    }

    pub fn general(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: None,
            row: None,
            message: message.into(),
        }
    }
}

/// Per-field analysis: counts, detected type, issues, and (for numeric
/// fields) detected outliers and value patterns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldAnalysis {
    /// Total number of records examined
    pub total: usize,

    /// Number of empty values
    pub empty: usize,

    /// Number of distinct non-empty values
    pub unique: usize,

    /// Detected data type; `None` when the field's type could not be
    /// established (e.g. entirely empty)
    pub data_type: Option<ColumnType>,

    /// Short descriptions of problems found in this field
    pub issues: Vec<String>,

    /// Outlying numeric values under the IQR rule
    pub outliers: Vec<f64>,

    /// Top value patterns (pattern name, occurrences), most common first
    pub patterns: Vec<(String, usize)>,
}

impl FieldAnalysis {
    /// Fraction of values that are non-empty, in [0, 1]
    pub fn completeness(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.total - self.empty) as f64 / self.total as f64
    }
}

/// Quality scores over a dataset's fields, each within [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScores {
    pub completeness: u8,
    pub consistency: u8,
    pub accuracy: u8,
    pub overall: u8,
}

/// Structured validation results for one dataset. Always produced alongside
/// a best-effort dataset; never aborts the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<ValidationIssue>,
    pub field_analysis: HashMap<String, FieldAnalysis>,
    pub quality: QualityScores,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of findings across all severities
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.suggestions.len()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Validation: {} errors, {} warnings, {} suggestions | quality {}/{}/{} overall {}",
            self.errors.len(),
            self.warnings.len(),
            self.suggestions.len(),
            self.quality.completeness,
            self.quality.consistency,
            self.quality.accuracy,
            self.quality.overall
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_field_display_names() {
        assert_eq!(SemanticField::GallonQty.to_string(), "Gallon Qty");
        assert_eq!(
            SemanticField::ActualCostByItem.to_string(),
            "Actual Cost by item"
        );
    }

    #[test]
    fn test_semantic_field_from_str_is_case_insensitive() {
        assert_eq!(
            "gallon qty".parse::<SemanticField>().unwrap(),
            SemanticField::GallonQty
        );
        assert_eq!(
            "Actual Profit By Item".parse::<SemanticField>().unwrap(),
            SemanticField::ActualProfitByItem
        );
        assert!("Fuel Grade".parse::<SemanticField>().is_err());
    }

    #[test]
    fn test_required_fields() {
        let required = SemanticField::required();
        assert_eq!(required.len(), 3);
        assert!(required.contains(&SemanticField::Date));
        assert!(required.contains(&SemanticField::Sales));
        assert!(required.contains(&SemanticField::GallonQty));
    }

    #[test]
    fn test_field_mapping_last_write_wins() {
        let mut mapping = FieldMapping::new();
        mapping.insert("Amount", SemanticField::Sales);
        mapping.insert("Revenue", SemanticField::Sales);

        assert_eq!(mapping.field_for("Amount"), None);
        assert_eq!(mapping.field_for("Revenue"), Some(SemanticField::Sales));
        assert_eq!(mapping.column_for(SemanticField::Sales), Some("Revenue"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_field_mapping_missing_required() {
        let mut mapping = FieldMapping::new();
        mapping.insert("Txn Date", SemanticField::Date);

        let missing = mapping.missing_required();
        assert_eq!(
            missing,
            vec![SemanticField::Sales, SemanticField::GallonQty]
        );
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::Text("   ".to_string()).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Text("Diesel".to_string()).is_empty());
    }

    #[test]
    fn test_field_value_export_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FieldValue::Date(date).to_export_string(), "2024-01-15");
        assert_eq!(FieldValue::Number(1234.56).to_export_string(), "1234.56");
        assert_eq!(FieldValue::Number(100.0).to_export_string(), "100");
        assert_eq!(FieldValue::Null.to_export_string(), "");
    }

    #[test]
    fn test_field_analysis_completeness() {
        let analysis = FieldAnalysis {
            total: 10,
            empty: 3,
            ..Default::default()
        };
        assert!((analysis.completeness() - 0.7).abs() < f64::EPSILON);

        let empty_analysis = FieldAnalysis::default();
        assert_eq!(empty_analysis.completeness(), 1.0);
    }

    #[test]
    fn test_validation_report_summary() {
        let mut report = ValidationReport::default();
        report
            .errors
            .push(ValidationIssue::general(Severity::High, "boom"));
        assert!(report.has_errors());
        assert_eq!(report.issue_count(), 1);
        assert!(report.summary().contains("1 errors"));
    }
}
