//! Fuelbook Importer Library
//!
//! A Rust library for ingesting tabular fuel delivery sales records from
//! delimited text or spreadsheet workbooks and turning them into validated,
//! normalized datasets for downstream reporting.
//!
//! This library provides tools for:
//! - Parsing delimited text and workbook files into a uniform grid of cells
//! - Profiling column types and suggesting semantic field mappings with
//!   confidence scores
//! - Resolving profiler suggestions and user overrides into a final mapping
//! - Coercing raw strings into typed values (dates, currency, numbers)
//! - Multi-dimensional quality validation (completeness/consistency/accuracy)
//! - Aggregating records into summary statistics and breakdown tables
//! - Exporting normalized datasets back to delimited text

pub mod config;
pub mod constants;
pub mod logging;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregation_engine;
        pub mod dataset_registry;
        pub mod exporter;
        pub mod import_pipeline;
        pub mod mapping_resolver;
        pub mod record_transformer;
        pub mod schema_profiler;
        pub mod tabular_parser;
        pub mod validation_engine;
    }
}

// Re-export commonly used types
pub use app::models::{Dataset, FieldMapping, SemanticField, SummaryStatistics, ValidationReport};
pub use app::services::import_pipeline::{FileFormat, ImportOutcome, ImportPipeline};
pub use config::{ImportConfig, ValidationConfig};

/// Result type alias for the importer
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for import operations
///
/// Only conditions that make the rest of the pipeline meaningless are
/// modeled as errors. Row-level and field-level problems are data: they are
/// collected into [`app::services::tabular_parser::ParseStats`] and
/// [`app::models::ValidationReport`] instead of being raised.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input could not be parsed into a header plus data rows
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// One or more required semantic fields are not mapped to any column
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },

    /// File extension does not correspond to a supported format
    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// Workbook could not be decoded or the requested sheet does not exist
    #[error("Workbook error: {message}")]
    Workbook { message: String },

    /// Configuration value out of range
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Low-level CSV machinery error
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a missing-required-fields error from field display names
    pub fn missing_required_fields(fields: Vec<String>) -> Self {
        Self::MissingRequiredFields { fields }
    }

    /// Create an unsupported-format error
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create a workbook decoding error
    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "CSV processing failed".to_string(),
            source: error,
        }
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(error: calamine::XlsxError) -> Self {
        Self::Workbook {
            message: error.to_string(),
        }
    }
}
