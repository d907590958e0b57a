//! Delimited-text parsing
//!
//! Turns raw delimited text into a [`RawTable`], handling quoted fields
//! (embedded delimiters stay literal, doubled quotes collapse to one),
//! skipping fully blank lines, and skipping rows whose field count does not
//! match the header row.

use tracing::{debug, info};

use super::stats::{ParseResult, ParseStats};
use crate::app::models::RawTable;
use crate::{Error, Result};

/// Parse delimited text content into a table of string cells.
///
/// A row whose field count differs from the header count is skipped and
/// recorded as a diagnostic; it never aborts the import. Fails with a parse
/// error when the input has fewer than two non-blank lines (no header plus
/// at least one data line).
pub fn parse_delimited(content: &str, delimiter: u8) -> Result<ParseResult> {
    let mut stats = ParseStats::new();
    stats.total_lines = content.lines().count();

    // Blank lines carry no cells in any dialect; drop them before the
    // reader sees them so they are neither rows nor diagnostics.
    let non_blank: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if non_blank.len() < 2 {
        return Err(Error::parse(format!(
            "Input has {} non-blank line(s); need a header row and at least one data row",
            non_blank.len()
        )));
    }

    let body = non_blank.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::parse(format!("Failed to read header row: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        // Header is line 1, first record line 2
        let line = index + 2;

        match result {
            Ok(record) => {
                if record.len() != headers.len() {
                    let message = format!(
                        "Row at line {} has {} field(s), expected {}; row skipped",
                        line,
                        record.len(),
                        headers.len()
                    );
                    debug!("{}", message);
                    stats.skip(message);
                    continue;
                }

                rows.push(record.iter().map(|cell| cell.to_string()).collect());
                stats.rows_parsed += 1;
            }
            Err(e) => {
                let message = format!("Row at line {} could not be read: {}; row skipped", line, e);
                debug!("{}", message);
                stats.skip(message);
            }
        }
    }

    info!("{}", stats.summary());

    Ok(ParseResult::new(RawTable { headers, rows }, stats))
}
