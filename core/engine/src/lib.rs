//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the dataset engine.
//! CONTEXT: Re-exports the value model, the immutable table and number
//! formatting for use by the loader and the aggregation crates.

pub mod error;
pub mod number_format;
pub mod table;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::SchemaError;
pub use number_format::{format_count, format_number, presets, NumberFormat};
pub use table::{columns, Table};
pub use value::{Value, NA_MARKERS};
