//! Tabular parsing: raw file content to a grid of string cells
//!
//! Two input modes share one contract:
//! - Delimited text is parsed directly, respecting quoted fields.
//! - Workbooks have a sheet extracted and serialized to the same delimited
//!   form first, so row policies (blank-line skipping, field-count
//!   mismatch handling) apply identically.
//!
//! Row-level problems are diagnostics in [`ParseStats`], never errors; the
//! only fatal condition is input too short to contain a header and a data
//! row.

pub mod delimited;
pub mod stats;
pub mod workbook;

#[cfg(test)]
mod tests;

pub use delimited::parse_delimited;
pub use stats::{ParseResult, ParseStats};
pub use workbook::{parse_workbook, sheet_names};
