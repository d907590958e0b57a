//! Field suggestion rules
//!
//! A prioritized table of (keywords, type constraints, target field)
//! entries evaluated in a fixed order. Three passes run in decreasing
//! confidence: exact header-name match, keyword match, then type-only
//! correlation.

use crate::app::models::{ColumnType, SemanticField};
use crate::constants::confidence;

/// One suggestion rule. `keywords` match case-insensitively as substrings
/// of the column name; `keyword_types`, when set, restricts the keyword
/// match to columns of those inferred types; `type_hint`, when set, lets
/// the inferred type alone suggest the field.
struct FieldRule {
    field: SemanticField,
    keywords: &'static [&'static str],
    keyword_types: Option<&'static [ColumnType]>,
    type_hint: Option<ColumnType>,
}

/// Rule table in evaluation order
const RULES: &[FieldRule] = &[
    FieldRule {
        field: SemanticField::Date,
        keywords: &["date", "time"],
        keyword_types: None,
        type_hint: Some(ColumnType::Date),
    },
    FieldRule {
        field: SemanticField::Sales,
        keywords: &["sales", "revenue", "amount", "amt"],
        keyword_types: None,
        type_hint: Some(ColumnType::Currency),
    },
    FieldRule {
        field: SemanticField::GallonQty,
        keywords: &["gallon", "gal", "qty", "quantity"],
        keyword_types: Some(&[ColumnType::Number, ColumnType::Currency]),
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::ActualProfitByItem,
        keywords: &["profit", "margin"],
        keyword_types: Some(&[ColumnType::Currency, ColumnType::Number]),
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::ActualCostByItem,
        keywords: &["cost", "expense"],
        keyword_types: Some(&[ColumnType::Currency, ColumnType::Number]),
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::Customer,
        keywords: &["customer", "client"],
        keyword_types: None,
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::Driver,
        keywords: &["driver", "operator"],
        keyword_types: None,
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::ProductType,
        keywords: &["product", "fuel", "type"],
        keyword_types: None,
        type_hint: None,
    },
    FieldRule {
        field: SemanticField::Location,
        keywords: &["location", "address", "city", "state"],
        keyword_types: None,
        type_hint: None,
    },
];

/// Suggest a semantic field for a column, returning the field and the
/// confidence tier that matched. `None` when no rule fires (the caller
/// reports the floor confidence with no suggestion).
pub fn suggest_field(column_name: &str, inferred: ColumnType) -> Option<(SemanticField, f64)> {
    let name = column_name.trim().to_lowercase();

    // Pass 1: the header is literally a semantic field name
    if let Ok(field) = column_name.parse::<SemanticField>() {
        return Some((field, confidence::EXACT_NAME));
    }

    // Pass 2: keyword match, honoring any type restriction
    for rule in RULES {
        let keyword_hit = rule.keywords.iter().any(|keyword| name.contains(keyword));
        let type_ok = rule
            .keyword_types
            .map(|types| types.contains(&inferred))
            .unwrap_or(true);

        if keyword_hit && type_ok {
            return Some((rule.field, confidence::KEYWORD));
        }
    }

    // Pass 3: the inferred type alone correlates with a field
    for rule in RULES {
        if rule.type_hint == Some(inferred) {
            return Some((rule.field, confidence::TYPE_ONLY));
        }
    }

    None
}
