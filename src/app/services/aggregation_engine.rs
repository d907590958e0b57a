//! Aggregation over processed records
//!
//! Computes the dataset summary, categorical breakdown tables, and
//! time-bucketed trends. All aggregations are single passes over whatever
//! [`RecordSource`] is supplied.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::{ProcessedRecord, RecordSource, SemanticField, SummaryStatistics};
use crate::constants::CANONICAL_DATE_FORMAT;

/// Granularity for time-bucketed trends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    Daily,
    Weekly,
    Monthly,
}

impl TimeBucket {
    /// The bucket key for a date: the date itself, that week's Sunday, or
    /// the year-month
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            TimeBucket::Daily => date.format(CANONICAL_DATE_FORMAT).to_string(),
            TimeBucket::Weekly => {
                let back = u64::from(date.weekday().num_days_from_sunday());
                let sunday = date.checked_sub_days(Days::new(back)).unwrap_or(date);
                sunday.format(CANONICAL_DATE_FORMAT).to_string()
            }
            TimeBucket::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }
}

/// Categorical key for breakdown tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakdownKey {
    Customer,
    ProductType,
    Location,
}

impl BreakdownKey {
    fn field(&self) -> SemanticField {
        match self {
            BreakdownKey::Customer => SemanticField::Customer,
            BreakdownKey::ProductType => SemanticField::ProductType,
            BreakdownKey::Location => SemanticField::Location,
        }
    }
}

/// One row of a breakdown table: accumulated metrics for one key value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub key: String,
    pub total_sales: f64,
    pub total_gallons: f64,
    pub total_profit: f64,
    pub transaction_count: usize,
}

impl BreakdownRow {
    fn accumulate(&mut self, sales: f64, gallons: f64, profit: f64) {
        self.total_sales += sales;
        self.total_gallons += gallons;
        self.total_profit += profit;
        self.transaction_count += 1;
    }
}

/// Service computing summaries, breakdowns, and trends
pub struct AggregationEngine;

impl AggregationEngine {
    /// Summary statistics over all records.
    ///
    /// Totals are plain sums over present numeric values. The average
    /// ratios are computed from the totals, so large transactions weigh
    /// proportionally. Records with a null Date still count here.
    pub fn summarize(source: &(impl RecordSource + ?Sized)) -> SummaryStatistics {
        let records = source.records();
        let mut summary = SummaryStatistics {
            record_count: records.len(),
            ..Default::default()
        };

        let mut customers = HashSet::new();
        let mut product_types = HashSet::new();

        for record in records {
            summary.total_sales += record
                .number(SemanticField::Sales.display_name())
                .unwrap_or(0.0);
            summary.total_gallons += record
                .number(SemanticField::GallonQty.display_name())
                .unwrap_or(0.0);
            summary.total_profit += record
                .number(SemanticField::ActualProfitByItem.display_name())
                .unwrap_or(0.0);
            summary.total_cost += record
                .number(SemanticField::ActualCostByItem.display_name())
                .unwrap_or(0.0);

            if let Some(customer) = record.text(SemanticField::Customer.display_name()) {
                customers.insert(customer.to_string());
            }
            if let Some(product) = record.text(SemanticField::ProductType.display_name()) {
                product_types.insert(product.to_string());
            }
        }

        if summary.total_sales != 0.0 {
            summary.avg_profit_margin = summary.total_profit / summary.total_sales * 100.0;
        }
        if summary.total_gallons != 0.0 {
            summary.avg_revenue_per_gallon = summary.total_sales / summary.total_gallons;
        }
        summary.unique_customers = customers.len();
        summary.unique_product_types = product_types.len();

        debug!(
            "Summarized {} record(s): sales {:.2}, gallons {:.2}",
            summary.record_count, summary.total_sales, summary.total_gallons
        );
        summary
    }

    /// Breakdown table grouped by a categorical field, sorted descending
    /// by total sales. Records without a value for the key are grouped
    /// under "(unspecified)".
    pub fn breakdown(source: &(impl RecordSource + ?Sized), key: BreakdownKey) -> Vec<BreakdownRow> {
        let field = key.field().display_name();
        let mut rows: HashMap<String, BreakdownRow> = HashMap::new();

        for record in source.records() {
            let key_value = record
                .text(field)
                .unwrap_or("(unspecified)")
                .to_string();
            Self::accumulate_into(rows.entry(key_value.clone()).or_insert_with(|| {
                BreakdownRow {
                    key: key_value,
                    ..Default::default()
                }
            }), record);
        }

        Self::sorted_rows(rows)
    }

    /// The `n` breakdown rows with the highest total sales
    pub fn top_n(
        source: &(impl RecordSource + ?Sized),
        key: BreakdownKey,
        n: usize,
    ) -> Vec<BreakdownRow> {
        let mut rows = Self::breakdown(source, key);
        rows.truncate(n);
        rows
    }

    /// Time-bucketed trend in chronological key order. Records with a
    /// null Date are excluded.
    pub fn trend(source: &(impl RecordSource + ?Sized), bucket: TimeBucket) -> Vec<BreakdownRow> {
        let date_field = SemanticField::Date.display_name();
        let mut rows: HashMap<String, BreakdownRow> = HashMap::new();

        for record in source.records() {
            let Some(date) = record.date(date_field) else {
                continue;
            };
            let key_value = bucket.key(date);
            Self::accumulate_into(rows.entry(key_value.clone()).or_insert_with(|| {
                BreakdownRow {
                    key: key_value,
                    ..Default::default()
                }
            }), record);
        }

        let mut rows: Vec<BreakdownRow> = rows.into_values().collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows
    }

    fn accumulate_into(row: &mut BreakdownRow, record: &ProcessedRecord) {
        row.accumulate(
            record
                .number(SemanticField::Sales.display_name())
                .unwrap_or(0.0),
            record
                .number(SemanticField::GallonQty.display_name())
                .unwrap_or(0.0),
            record
                .number(SemanticField::ActualProfitByItem.display_name())
                .unwrap_or(0.0),
        );
    }

    fn sorted_rows(rows: HashMap<String, BreakdownRow>) -> Vec<BreakdownRow> {
        let mut rows: Vec<BreakdownRow> = rows.into_values().collect();
        rows.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales).then_with(|| a.key.cmp(&b.key)));
        rows
    }
}
