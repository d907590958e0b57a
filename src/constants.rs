//! Application constants for the fuelbook importer
//!
//! This module contains the semantic field vocabulary, heuristic keyword
//! tables, confidence tiers, and thresholds used throughout the import
//! pipeline.

// =============================================================================
// Semantic Field Names
// =============================================================================

/// Canonical display names for the fixed set of semantic fields that all
/// imported data is normalized into.
pub mod fields {
    pub const DATE: &str = "Date";
    pub const SALES: &str = "Sales";
    pub const GALLON_QTY: &str = "Gallon Qty";
    pub const PROFIT: &str = "Actual Profit By Item";
    pub const COST: &str = "Actual Cost by item";
    pub const CUSTOMER: &str = "Customer";
    pub const DRIVER: &str = "Driver";
    pub const PRODUCT_TYPE: &str = "Product Type";
    pub const LOCATION: &str = "Location";

    /// Fields that must be mapped before a dataset may be built
    pub const REQUIRED: &[&str] = &[DATE, SALES, GALLON_QTY];
}

/// Names of fields derived during transformation
pub mod derived {
    pub const PROFIT_MARGIN: &str = "ProfitMargin";
    pub const REVENUE_PER_GALLON: &str = "RevenuePerGallon";
}

// =============================================================================
// Profiling Constants
// =============================================================================

/// Maximum non-empty sample values examined per column during profiling
pub const PROFILE_SAMPLE_SIZE: usize = 5;

/// Fraction of sampled values that must match for a type to be inferred
pub const TYPE_MATCH_RATIO: f64 = 0.7;

/// Confidence tiers for field suggestions
pub mod confidence {
    /// Header is literally a semantic field name
    pub const EXACT_NAME: f64 = 0.9;

    /// Header contains a recognized keyword
    pub const KEYWORD: f64 = 0.7;

    /// Only the inferred type correlates with the field
    pub const TYPE_ONLY: f64 = 0.5;

    /// No rule fired
    pub const NONE: f64 = 0.3;
}

/// Confidence threshold for the confirm-on-open automatic pass
pub const AUTO_ACCEPT_CONFIDENCE: f64 = 0.7;

/// Confidence threshold for the explicit "auto-detect" user action
pub const AUTO_DETECT_CONFIDENCE: f64 = 0.5;

// =============================================================================
// Validation Constants
// =============================================================================

/// Non-empty ratio below which a field draws a completeness warning
pub const COMPLETENESS_WARN_RATIO: f64 = 0.8;

/// IQR multiplier for the outlier fences
pub const OUTLIER_IQR_MULTIPLIER: f64 = 1.5;

/// Minimum numeric sample size before outlier detection runs
pub const OUTLIER_MIN_SAMPLE: usize = 4;

/// Tolerance for the profit-consistency cross check (|profit - (sales - cost)|)
pub const PROFIT_TOLERANCE: f64 = 0.01;

/// Fraction of lowercase-only values that triggers a case-inconsistency
/// suggestion in an otherwise mixed-case field
pub const CASE_INCONSISTENCY_RATIO: f64 = 0.1;

/// Number of value patterns kept in a field's pattern histogram
pub const PATTERN_TOP_N: usize = 5;

/// Years beyond the current year before a date draws a future-date warning
pub const FUTURE_YEAR_SLACK: i32 = 1;

// =============================================================================
// Date Handling Constants
// =============================================================================

/// Canonical date form used for export and workbook cell normalization
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Generic calendar formats tried first, with the year bounded to
/// [`MIN_DATE_YEAR`, `MAX_DATE_YEAR`)
pub const GENERIC_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Generic datetime formats whose date component is accepted
pub const GENERIC_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Explicit US date format tried after the generic formats, without the
/// year bound (ancient dates must survive coercion to be warned about)
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Inclusive lower bound for generic date parsing
pub const MIN_DATE_YEAR: i32 = 1900;

/// Exclusive upper bound for generic date parsing
pub const MAX_DATE_YEAR: i32 = 2100;

// =============================================================================
// Column-Name Keyword Tables
// =============================================================================

/// Keyword tables for column-name heuristics, matched case-insensitively as
/// substrings of the column name.
pub mod keywords {
    /// Fields whose numeric distribution is subject to outlier detection
    pub const FINANCIAL: &[&str] = &["sales", "cost", "profit", "price", "amount", "revenue"];

    /// Fields expected to hold non-negative values
    pub const NON_NEGATIVE: &[&str] = &["sales", "quantity", "qty", "gallon", "amount"];

    /// Identifier-like fields checked for duplicate values
    pub const IDENTIFIER: &[&str] = &["id", "key", "number", "code"];

    /// Name-like fields checked for case consistency
    pub const NAME_LIKE: &[&str] = &["name", "customer", "client", "driver", "operator"];
}

// =============================================================================
// Helper Functions
// =============================================================================

fn name_contains_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Check if a field name denotes a financial quantity
pub fn is_financial_field(name: &str) -> bool {
    name_contains_any(name, keywords::FINANCIAL)
}

/// Check if a field name denotes a quantity expected to be non-negative
pub fn is_non_negative_field(name: &str) -> bool {
    name_contains_any(name, keywords::NON_NEGATIVE)
}

/// Check if a field name denotes an identifier
pub fn is_identifier_field(name: &str) -> bool {
    name_contains_any(name, keywords::IDENTIFIER)
}

/// Check if a field name denotes a person or entity name
pub fn is_name_like_field(name: &str) -> bool {
    name_contains_any(name, keywords::NAME_LIKE)
}
