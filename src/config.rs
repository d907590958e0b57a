//! Configuration management and validation.
//!
//! Provides configuration structures for the profiling, coercion, and
//! validation stages of the import pipeline. Embedding applications may
//! tighten or loosen the thresholds per import.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Policy for numeric cells that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericPolicy {
    /// Unparseable numeric text coerces to 0, keeping every downstream sum
    /// well-defined at the cost of masking bad data as legitimate zeros.
    CoerceToZero,

    /// Unparseable numeric text coerces to null so it cannot enter sums.
    /// The invalid-value count reaches the validation report either way.
    Strict,
}

/// Configuration for parsing, profiling, and mapping resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Non-empty values sampled per column when inferring types
    pub profile_sample_size: usize,

    /// Confidence at or above which a suggestion is auto-accepted when a
    /// mapping dialog opens
    pub auto_accept_confidence: f64,

    /// Lower confidence threshold used by the explicit auto-detect action
    pub auto_detect_confidence: f64,

    /// Handling of unparseable numeric cells
    pub numeric_policy: NumericPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            profile_sample_size: constants::PROFILE_SAMPLE_SIZE,
            auto_accept_confidence: constants::AUTO_ACCEPT_CONFIDENCE,
            auto_detect_confidence: constants::AUTO_DETECT_CONFIDENCE,
            numeric_policy: NumericPolicy::CoerceToZero,
        }
    }
}

impl ImportConfig {
    /// Validate configuration values for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.profile_sample_size == 0 {
            return Err(Error::configuration(
                "profile_sample_size must be at least 1",
            ));
        }

        for (name, value) in [
            ("auto_accept_confidence", self.auto_accept_confidence),
            ("auto_detect_confidence", self.auto_detect_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.auto_detect_confidence > self.auto_accept_confidence {
            return Err(Error::configuration(
                "auto_detect_confidence must not exceed auto_accept_confidence",
            ));
        }

        Ok(())
    }
}

/// Configuration for the validation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Non-empty ratio below which a completeness warning is emitted
    pub completeness_warn_ratio: f64,

    /// Multiplier applied to the IQR when computing outlier fences
    pub iqr_multiplier: f64,

    /// Minimum numeric sample size before outlier detection runs
    pub outlier_min_sample: usize,

    /// Tolerance for the profit-consistency cross check
    pub profit_tolerance: f64,

    /// Lowercase-only ratio that triggers a case-inconsistency suggestion
    pub case_inconsistency_ratio: f64,

    /// Years beyond the current year before a date is considered future
    pub future_year_slack: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            completeness_warn_ratio: constants::COMPLETENESS_WARN_RATIO,
            iqr_multiplier: constants::OUTLIER_IQR_MULTIPLIER,
            outlier_min_sample: constants::OUTLIER_MIN_SAMPLE,
            profit_tolerance: constants::PROFIT_TOLERANCE,
            case_inconsistency_ratio: constants::CASE_INCONSISTENCY_RATIO,
            future_year_slack: constants::FUTURE_YEAR_SLACK,
        }
    }
}

impl ValidationConfig {
    /// Validate configuration values for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.completeness_warn_ratio) {
            return Err(Error::configuration(format!(
                "completeness_warn_ratio must be within [0, 1], got {}",
                self.completeness_warn_ratio
            )));
        }

        if self.iqr_multiplier <= 0.0 {
            return Err(Error::configuration("iqr_multiplier must be positive"));
        }

        if self.profit_tolerance < 0.0 {
            return Err(Error::configuration(
                "profit_tolerance must be non-negative",
            ));
        }

        Ok(())
    }
}
