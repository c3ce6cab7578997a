//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

/// Raised when a dataset does not have the shape an operation needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}' is not numeric (row {row} holds '{value}')")]
    NonNumeric {
        column: String,
        /// 1-based data row, not counting the header.
        row: usize,
        value: String,
    },
}
