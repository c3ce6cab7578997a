//! FILENAME: core/insight-engine/src/error.rs

use engine::SchemaError;
use persistence::NoDatasetError;
use thiserror::Error;

/// Failure of a single aggregation request.
/// None of these leave partial output behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    #[error("no dataset has been loaded")]
    NoDataset,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<NoDatasetError> for InsightError {
    fn from(_: NoDatasetError) -> Self {
        InsightError::NoDataset
    }
}
