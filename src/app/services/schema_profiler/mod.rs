//! Schema profiling: column type inference and field suggestions
//!
//! Examines a bounded sample of each column's values (the first few
//! non-empty cells) and produces one [`ColumnProfile`] per header: an
//! inferred data type plus a suggested semantic field with a confidence
//! score. Confidence is advisory only; it ranks automatic acceptance in
//! the mapping resolver and never blocks a mapping.

pub mod field_rules;
pub mod type_inference;

#[cfg(test)]
mod tests;

pub use field_rules::suggest_field;
pub use type_inference::infer_column_type;

use tracing::{debug, info};

use crate::app::models::{ColumnProfile, RawTable};
use crate::config::ImportConfig;
use crate::constants::confidence;

/// Service for profiling the columns of a parsed table
pub struct SchemaProfiler;

impl SchemaProfiler {
    /// Build one profile per header from a bounded sample of each column.
    pub fn profile(table: &RawTable, config: &ImportConfig) -> Vec<ColumnProfile> {
        let profiles: Vec<ColumnProfile> = table
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| Self::profile_column(table, index, name, config))
            .collect();

        info!(
            "Profiled {} column(s), {} with suggestions",
            profiles.len(),
            profiles
                .iter()
                .filter(|p| p.suggested_field.is_some())
                .count()
        );

        profiles
    }

    fn profile_column(
        table: &RawTable,
        index: usize,
        name: &str,
        config: &ImportConfig,
    ) -> ColumnProfile {
        let sample_values: Vec<String> = table
            .rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .take(config.profile_sample_size)
            .map(|cell| cell.to_string())
            .collect();

        let inferred_type = infer_column_type(&sample_values);
        let (suggested_field, score) = match suggest_field(name, inferred_type) {
            Some((field, score)) => (Some(field), score),
            None => (None, confidence::NONE),
        };

        debug!(
            "Column '{}' inferred as {} -> {:?} (confidence {:.1})",
            name, inferred_type, suggested_field, score
        );

        ColumnProfile {
            name: name.to_string(),
            index,
            inferred_type,
            sample_values,
            suggested_field,
            confidence: score,
        }
    }
}
