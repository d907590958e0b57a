//! Validation orchestration

use tracing::{info, instrument};

use crate::app::models::{ProcessedRecord, SemanticField, Severity, ValidationIssue, ValidationReport};
use crate::app::services::record_transformer::TransformStats;
use crate::config::ValidationConfig;

use super::{field_analysis, quality};

/// Service running per-field and cross-record validation over transformed
/// records. Validation never fails: every problem becomes an issue in the
/// report.
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate transformed records against their effective headers.
    ///
    /// `stats` carries the transformer's unparseable cell counts, which
    /// are no longer visible in the coerced values.
    #[instrument(skip_all, fields(records = records.len(), fields = headers.len()))]
    pub fn validate(
        &self,
        records: &[ProcessedRecord],
        headers: &[String],
        stats: &TransformStats,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();

        if records.is_empty() {
            report.errors.push(ValidationIssue::general(
                Severity::High,
                "Dataset contains no records",
            ));
            info!("{}", report.summary());
            return report;
        }

        for field in [SemanticField::Date, SemanticField::Sales] {
            let name = field.display_name();
            if !headers.iter().any(|header| header == name) {
                report.errors.push(ValidationIssue::general(
                    Severity::High,
                    format!("Required field '{}' is missing from the dataset", name),
                ));
            }
        }

        for header in headers {
            let findings = field_analysis::analyze_field(
                header,
                records,
                stats.invalid_dates.get(header).copied().unwrap_or(0),
                stats.invalid_numbers.get(header).copied().unwrap_or(0),
                &self.config,
            );
            report.errors.extend(findings.errors);
            report.warnings.extend(findings.warnings);
            report.suggestions.extend(findings.suggestions);
            report
                .field_analysis
                .insert(header.clone(), findings.analysis);
        }

        self.check_profit_consistency(records, &mut report);

        report.quality = quality::compute(&report.field_analysis, report.errors.len());
        info!("{}", report.summary());
        report
    }

    /// Cross-field check: reported profit should reconcile with sales
    /// minus cost wherever all three are present on a row
    fn check_profit_consistency(&self, records: &[ProcessedRecord], report: &mut ValidationReport) {
        let profit_field = SemanticField::ActualProfitByItem.display_name();
        let sales_field = SemanticField::Sales.display_name();
        let cost_field = SemanticField::ActualCostByItem.display_name();

        for (row, record) in records.iter().enumerate() {
            let (Some(profit), Some(sales), Some(cost)) = (
                record.number(profit_field),
                record.number(sales_field),
                record.number(cost_field),
            ) else {
                continue;
            };

            let gap = (profit - (sales - cost)).abs();
            if gap > self.config.profit_tolerance {
                report.warnings.push(ValidationIssue::row_issue(
                    Severity::Medium,
                    profit_field,
                    row,
                    format!(
                        "Row {}: profit {:.2} differs from sales - cost = {:.2}",
                        row + 1,
                        profit,
                        sales - cost
                    ),
                ));
            }
        }
    }
}
