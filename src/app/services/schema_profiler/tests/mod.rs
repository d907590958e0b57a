//! Schema profiler tests


use crate::app::models::RawTable;

/// Build a table from string literals for profiling tests
pub fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}
