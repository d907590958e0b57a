//! Validation engine
//!
//! Runs per-field analysis (completeness, type checks, outliers, value
//! patterns), cross-record consistency checks, and quality scoring over
//! transformed records. Produces a structured report; never aborts the
//! pipeline.

pub mod engine;
pub mod field_analysis;
pub mod outliers;
pub mod patterns;
pub mod quality;

#[cfg(test)]
mod tests;

pub use engine::ValidationEngine;
