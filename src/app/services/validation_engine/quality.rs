//! Dataset quality scoring

use std::collections::HashMap;

use crate::app::models::{FieldAnalysis, QualityScores};

/// Compute the 0-100 quality scores from the per-field analyses and the
/// total error count.
///
/// Completeness is the mean non-empty ratio over fields. Consistency is
/// the fraction of fields whose data type could be established. Accuracy
/// starts at 100 and loses ten points per error per field, floored at
/// zero. Overall is the arithmetic mean of the three.
pub fn compute(fields: &HashMap<String, FieldAnalysis>, error_count: usize) -> QualityScores {
    if fields.is_empty() {
        return QualityScores::default();
    }

    let field_count = fields.len() as f64;

    let completeness = fields
        .values()
        .map(FieldAnalysis::completeness)
        .sum::<f64>()
        / field_count
        * 100.0;

    let typed = fields
        .values()
        .filter(|analysis| analysis.data_type.is_some())
        .count() as f64;
    let consistency = typed / field_count * 100.0;

    let accuracy = (100.0 - error_count as f64 / field_count * 10.0).max(0.0);

    let overall = (completeness + consistency + accuracy) / 3.0;

    QualityScores {
        completeness: completeness.round() as u8,
        consistency: consistency.round() as u8,
        accuracy: accuracy.round() as u8,
        overall: overall.round() as u8,
    }
}
