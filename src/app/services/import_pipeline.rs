//! Import pipeline orchestration
//!
//! Drives one file through parse, profile, map, transform, validate, and
//! aggregate. The only awaited operations are reading file content and
//! decoding workbook bytes; every later stage is a synchronous single pass.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use tracing::{info, instrument};

use crate::app::models::{ColumnProfile, Dataset, FieldMapping, SemanticField, ValidationReport};
use crate::app::services::aggregation_engine::AggregationEngine;
use crate::app::services::mapping_resolver::MappingResolver;
use crate::app::services::record_transformer::{RecordTransformer, TransformStats};
use crate::app::services::schema_profiler::SchemaProfiler;
use crate::app::services::tabular_parser::{self, ParseStats};
use crate::app::services::validation_engine::ValidationEngine;
use crate::config::{ImportConfig, ValidationConfig};
use crate::{Error, Result};

/// How a file's bytes should be decoded, derived from its name unless the
/// caller overrides it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text with the given separator byte
    Delimited { delimiter: u8 },

    /// Spreadsheet workbook; `None` selects the first sheet
    Workbook { sheet: Option<String> },
}

impl FileFormat {
    /// Derive the format from a file name's extension
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Delimited { delimiter: b',' }),
            "tsv" | "tab" => Ok(FileFormat::Delimited { delimiter: b'\t' }),
            "xlsx" | "xlsm" => Ok(FileFormat::Workbook { sheet: None }),
            _ => Err(Error::unsupported_format(extension)),
        }
    }
}

/// Everything one import run produces: the dataset plus the diagnostics
/// from each stage
#[derive(Debug)]
pub struct ImportOutcome {
    pub dataset: Dataset,
    pub report: ValidationReport,
    pub profiles: Vec<ColumnProfile>,
    pub mapping: FieldMapping,
    pub parse_stats: ParseStats,
    pub transform_stats: TransformStats,
}

/// Orchestrates the full import chain for one file at a time
pub struct ImportPipeline {
    import_config: ImportConfig,
    validation_config: ValidationConfig,
}

impl ImportPipeline {
    pub fn new(import_config: ImportConfig, validation_config: ValidationConfig) -> Result<Self> {
        import_config.validate()?;
        validation_config.validate()?;
        Ok(Self {
            import_config,
            validation_config,
        })
    }

    /// Pipeline with default configuration
    pub fn with_defaults() -> Self {
        Self {
            import_config: ImportConfig::default(),
            validation_config: ValidationConfig::default(),
        }
    }

    /// Parse and profile without building a dataset, for interactive
    /// mapping review before a full import
    pub async fn profile_bytes(
        &self,
        bytes: &[u8],
        format: &FileFormat,
    ) -> Result<Vec<ColumnProfile>> {
        let parsed = self.parse(bytes, format).await?;
        Ok(SchemaProfiler::profile(&parsed.table, &self.import_config))
    }

    /// Import a file from disk. The file name supplies both the format
    /// hint and the source description.
    pub async fn import_file(
        &self,
        name: &str,
        path: impl AsRef<Path>,
        overrides: &BTreeMap<String, SemanticField>,
    ) -> Result<ImportOutcome> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let format = FileFormat::from_file_name(&file_name)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|error| Error::io(format!("Failed to read '{}'", path.display()), error))?;

        self.import_bytes(name, &file_name, &bytes, &format, overrides)
            .await
    }

    /// Import raw bytes through the full chain.
    ///
    /// Mapping failures abort; validation findings never do. The returned
    /// dataset is best-effort and always accompanied by the report.
    #[instrument(skip_all, fields(dataset = name))]
    pub async fn import_bytes(
        &self,
        name: &str,
        source_description: &str,
        bytes: &[u8],
        format: &FileFormat,
        overrides: &BTreeMap<String, SemanticField>,
    ) -> Result<ImportOutcome> {
        let parsed = self.parse(bytes, format).await?;
        let profiles = SchemaProfiler::profile(&parsed.table, &self.import_config);

        let mapping = MappingResolver::resolve(
            &profiles,
            overrides,
            self.import_config.auto_accept_confidence,
        );
        MappingResolver::ensure_required(&mapping)?;

        let transformed =
            RecordTransformer::transform(&parsed.table, &mapping, &self.import_config);

        let report = ValidationEngine::new(self.validation_config.clone()).validate(
            &transformed.records,
            &transformed.headers,
            &transformed.stats,
        );

        let summary = AggregationEngine::summarize(&transformed.records);

        let dataset = Dataset {
            name: name.to_string(),
            headers: transformed.headers,
            records: transformed.records,
            summary,
            uploaded_at: Utc::now(),
            source_description: source_description.to_string(),
        };

        info!(
            "Imported '{}': {} record(s), {} issue(s)",
            dataset.name,
            dataset.record_count(),
            report.issue_count()
        );

        Ok(ImportOutcome {
            dataset,
            report,
            profiles,
            mapping,
            parse_stats: parsed.stats,
            transform_stats: transformed.stats,
        })
    }

    /// Resolve a mapping at the lower auto-detect threshold, for the
    /// explicit "detect fields" user action
    pub fn auto_detect_mapping(&self, profiles: &[ColumnProfile]) -> FieldMapping {
        MappingResolver::resolve(
            profiles,
            &BTreeMap::new(),
            self.import_config.auto_detect_confidence,
        )
    }

    async fn parse(
        &self,
        bytes: &[u8],
        format: &FileFormat,
    ) -> Result<tabular_parser::ParseResult> {
        match format {
            FileFormat::Delimited { delimiter } => {
                let content = String::from_utf8_lossy(bytes);
                tabular_parser::parse_delimited(&content, *delimiter)
            }
            FileFormat::Workbook { sheet } => {
                tabular_parser::parse_workbook(bytes, sheet.as_deref(), b',')
            }
        }
    }
}
