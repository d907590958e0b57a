//! Workbook (spreadsheet) parsing
//!
//! Decodes an in-memory workbook, selects a sheet (the first by default),
//! serializes it to delimited text, and hands the result to the
//! delimited-text parser so both input modes share one row policy.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::{debug, info};

use super::delimited::parse_delimited;
use super::stats::ParseResult;
use crate::constants::CANONICAL_DATE_FORMAT;
use crate::{Error, Result};

/// List the sheet names of an in-memory workbook.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Parse one sheet of an in-memory workbook into a table of string cells.
///
/// `sheet` selects a sheet by name; `None` selects the first sheet.
pub fn parse_workbook(bytes: &[u8], sheet: Option<&str>, delimiter: u8) -> Result<ParseResult> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let names = workbook.sheet_names().to_vec();
    if names.is_empty() {
        return Err(Error::workbook("Workbook contains no sheets"));
    }

    let sheet_name = match sheet {
        Some(requested) => names
            .iter()
            .find(|name| name.as_str() == requested)
            .cloned()
            .ok_or_else(|| Error::workbook(format!("Sheet '{}' not found", requested)))?,
        None => names[0].clone(),
    };

    debug!("Reading workbook sheet '{}'", sheet_name);
    let range = workbook.worksheet_range(&sheet_name)?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    info!(
        "Workbook sheet '{}' yielded {} raw row(s)",
        sheet_name,
        grid.len()
    );

    let content = grid_to_delimited(&grid, delimiter)?;
    parse_delimited(&content, delimiter)
}

/// Render a workbook cell as the text a delimited file would carry.
///
/// Date cells are normalized to the canonical `YYYY-MM-DD` form so the
/// downstream date coercion sees one consistent representation.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.date().format(CANONICAL_DATE_FORMAT).to_string(),
            None => cell.to_string(),
        },
        other => other.to_string().trim().to_string(),
    }
}

/// Serialize a grid of cells to delimited text, quoting where needed.
pub fn grid_to_delimited(grid: &[Vec<String>], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in grid {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::parse(format!("Failed to serialize workbook sheet: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| Error::parse(format!("Sheet is not valid UTF-8: {}", e)))
}
