//! Mapping resolution: profiler suggestions plus user overrides
//!
//! Merges automatic field suggestions (accepted at or above a confidence
//! threshold) with explicit user choices into the final source-column to
//! semantic-field mapping, and enforces required-field presence before a
//! dataset may be built. Resolution is deterministic: identical profiles
//! and overrides always produce the identical mapping.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::app::models::{ColumnProfile, FieldMapping, SemanticField};
use crate::{Error, Result};

/// Service for resolving the final field mapping
pub struct MappingResolver;

impl MappingResolver {
    /// Merge profiler suggestions with user overrides.
    ///
    /// A suggestion enters the mapping when its confidence is at or above
    /// `threshold` (0.7 for the confirm-on-open pass, 0.5 for the explicit
    /// auto-detect action). Overrides always take precedence; they are
    /// applied in key order after every automatic suggestion, so an
    /// override can both claim a column and release a field a suggestion
    /// had claimed.
    pub fn resolve(
        profiles: &[ColumnProfile],
        overrides: &BTreeMap<String, SemanticField>,
        threshold: f64,
    ) -> FieldMapping {
        let mut mapping = FieldMapping::new();

        for profile in profiles {
            if let Some(field) = profile.suggested_field {
                if profile.confidence >= threshold {
                    debug!(
                        "Auto-accepting '{}' -> {} (confidence {:.1})",
                        profile.name, field, profile.confidence
                    );
                    mapping.insert(profile.name.clone(), field);
                }
            }
        }

        for (column, field) in overrides {
            debug!("Applying override '{}' -> {}", column, field);
            mapping.insert(column.clone(), *field);
        }

        info!(
            "Resolved mapping: {} column(s) mapped ({} override(s))",
            mapping.len(),
            overrides.len()
        );

        mapping
    }

    /// Verify that every required semantic field is claimed by exactly one
    /// source column. Fails with an error naming the missing fields.
    pub fn ensure_required(mapping: &FieldMapping) -> Result<()> {
        let missing = mapping.missing_required();
        if missing.is_empty() {
            return Ok(());
        }

        Err(Error::missing_required_fields(
            missing
                .into_iter()
                .map(|field| field.display_name().to_string())
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ColumnType;
    use crate::constants::{AUTO_ACCEPT_CONFIDENCE, AUTO_DETECT_CONFIDENCE};

    fn profile(name: &str, field: Option<SemanticField>, confidence: f64) -> ColumnProfile {
        ColumnProfile {
            name: name.to_string(),
            index: 0,
            inferred_type: ColumnType::Text,
            sample_values: vec![],
            suggested_field: field,
            confidence,
        }
    }

    #[test]
    fn test_auto_accept_at_threshold() {
        let profiles = vec![
            profile("Txn Date", Some(SemanticField::Date), 0.7),
            profile("Memo", Some(SemanticField::Customer), 0.5),
        ];

        let mapping =
            MappingResolver::resolve(&profiles, &BTreeMap::new(), AUTO_ACCEPT_CONFIDENCE);

        assert_eq!(mapping.field_for("Txn Date"), Some(SemanticField::Date));
        assert_eq!(mapping.field_for("Memo"), None);
    }

    #[test]
    fn test_auto_detect_uses_lower_threshold() {
        let profiles = vec![profile("Memo", Some(SemanticField::Customer), 0.5)];

        let mapping =
            MappingResolver::resolve(&profiles, &BTreeMap::new(), AUTO_DETECT_CONFIDENCE);

        assert_eq!(mapping.field_for("Memo"), Some(SemanticField::Customer));
    }

    #[test]
    fn test_override_beats_suggestion() {
        let profiles = vec![profile("Amount", Some(SemanticField::Sales), 0.9)];
        let mut overrides = BTreeMap::new();
        overrides.insert("Amount".to_string(), SemanticField::ActualCostByItem);

        let mapping = MappingResolver::resolve(&profiles, &overrides, AUTO_ACCEPT_CONFIDENCE);

        assert_eq!(
            mapping.field_for("Amount"),
            Some(SemanticField::ActualCostByItem)
        );
    }

    #[test]
    fn test_override_releases_suggested_column() {
        // The suggestion claims Sales for "Amount"; the user then maps
        // "Revenue" to Sales instead
        let profiles = vec![profile("Amount", Some(SemanticField::Sales), 0.9)];
        let mut overrides = BTreeMap::new();
        overrides.insert("Revenue".to_string(), SemanticField::Sales);

        let mapping = MappingResolver::resolve(&profiles, &overrides, AUTO_ACCEPT_CONFIDENCE);

        assert_eq!(mapping.field_for("Amount"), None);
        assert_eq!(mapping.field_for("Revenue"), Some(SemanticField::Sales));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let profiles = vec![
            profile("Txn Date", Some(SemanticField::Date), 0.7),
            profile("Amt", Some(SemanticField::Sales), 0.7),
            profile("Gal", Some(SemanticField::GallonQty), 0.7),
        ];
        let mut overrides = BTreeMap::new();
        overrides.insert("Gal".to_string(), SemanticField::GallonQty);

        let first = MappingResolver::resolve(&profiles, &overrides, AUTO_ACCEPT_CONFIDENCE);
        let second = MappingResolver::resolve(&profiles, &overrides, AUTO_ACCEPT_CONFIDENCE);

        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_required_names_missing_fields() {
        let mut mapping = FieldMapping::new();
        mapping.insert("Txn Date", SemanticField::Date);

        let err = MappingResolver::ensure_required(&mapping).unwrap_err();
        match err {
            crate::Error::MissingRequiredFields { fields } => {
                assert_eq!(fields, vec!["Sales", "Gallon Qty"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ensure_required_passes_when_all_mapped() {
        let mut mapping = FieldMapping::new();
        mapping.insert("Txn Date", SemanticField::Date);
        mapping.insert("Amt", SemanticField::Sales);
        mapping.insert("Gal", SemanticField::GallonQty);

        assert!(MappingResolver::ensure_required(&mapping).is_ok());
    }
}
