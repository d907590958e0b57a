//! Record transformation service
//!
//! Converts raw string grids into typed records under a resolved field
//! mapping: canonical header renaming, date and numeric coercion, empty-row
//! dropping, and derived financial fields.

pub mod coercion;
pub mod transformer;

#[cfg(test)]
mod tests;

pub use coercion::{coerce_date, coerce_number, CoercedNumber};
pub use transformer::{RecordTransformer, TransformResult, TransformStats};
