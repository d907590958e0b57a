//! Interquartile-range outlier detection

/// Detect outliers under the IQR fence rule.
///
/// Values below Q1 - multiplier * IQR or above Q3 + multiplier * IQR are
/// flagged. Quartiles are taken positionally on the sorted sample (Q1 at
/// n/4, Q3 at 3n/4). Detection is skipped entirely below `min_sample`
/// values, where fences are meaningless.
pub fn detect_outliers(values: &[f64], multiplier: f64, min_sample: usize) -> Vec<f64> {
    if values.len() < min_sample {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = sorted[sorted.len() / 4];
    let q3 = sorted[sorted.len() * 3 / 4];
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    values
        .iter()
        .copied()
        .filter(|value| *value < lower || *value > upper)
        .collect()
}
