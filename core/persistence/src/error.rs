//! FILENAME: core/persistence/src/error.rs

use engine::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CSV: {0}")]
    Parse(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Returned when an operation needs a dataset and none has been loaded yet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no dataset has been loaded")]
pub struct NoDatasetError;
