//! Tests for the record transformation service


use crate::app::models::{FieldMapping, RawTable, SemanticField};

/// A small delivery table with the usual abbreviated headers
pub fn sample_table() -> RawTable {
    RawTable {
        headers: vec![
            "Txn Date".to_string(),
            "Amt".to_string(),
            "Gal".to_string(),
            "Notes".to_string(),
        ],
        rows: vec![
            vec![
                "2024-01-15".to_string(),
                "$40.00".to_string(),
                "20".to_string(),
                "morning run".to_string(),
            ],
            vec![
                "01/16/2024".to_string(),
                "60".to_string(),
                "50".to_string(),
                "".to_string(),
            ],
        ],
    }
}

/// Mapping matching [`sample_table`], leaving "Notes" unmapped
pub fn sample_mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new();
    mapping.insert("Txn Date", SemanticField::Date);
    mapping.insert("Amt", SemanticField::Sales);
    mapping.insert("Gal", SemanticField::GallonQty);
    mapping
}

/// Build a single-column table from raw cell values
pub fn column_table(header: &str, cells: &[&str]) -> RawTable {
    RawTable {
        headers: vec![header.to_string()],
        rows: cells.iter().map(|cell| vec![cell.to_string()]).collect(),
    }
}
