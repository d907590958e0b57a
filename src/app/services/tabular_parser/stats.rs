//! Parse statistics and result structures for tabular parsing

use crate::app::models::RawTable;

/// Statistics for one parse operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Total lines in the input, including blank lines
    pub total_lines: usize,

    /// Data rows accepted into the table
    pub rows_parsed: usize,

    /// Rows skipped for a field-count mismatch or a reader-level error
    pub rows_skipped: usize,

    /// Human-readable diagnostics for every skipped row
    pub diagnostics: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row with its diagnostic message
    pub fn skip(&mut self, message: String) {
        self.rows_skipped += 1;
        self.diagnostics.push(message);
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Parsed {} rows ({} skipped) from {} lines",
            self.rows_parsed, self.rows_skipped, self.total_lines
        )
    }
}

/// Result of parsing one file: the cell grid plus statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: RawTable,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn new(table: RawTable, stats: ParseStats) -> Self {
        Self { table, stats }
    }
}
