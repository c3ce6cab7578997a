//! FILENAME: app/src/error.rs
//! PURPOSE: Errors surfaced at the application boundary.
//! CONTEXT: Every variant maps to its own user-facing notice. None of them
//! ends the process on its own; the caller decides the exit status.

use engine::SchemaError;
use insight_engine::InsightError;
use persistence::{LoadError, NoDatasetError};
use thiserror::Error;

pub const NOTICE_NO_DATASET: &str = "Please upload a dataset first.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no dataset has been loaded")]
    NoDataset,

    #[error("invalid CSV: {0}")]
    Parse(String),

    #[error("schema error: {0}")]
    Schema(SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// The message shown to the user.
    pub fn notice(&self) -> String {
        match self {
            AppError::NoDataset => NOTICE_NO_DATASET.to_string(),
            AppError::Parse(detail) => format!("Please upload a valid CSV file ({}).", detail),
            AppError::Schema(e) => format!("The dataset does not have the data this view needs: {}.", e),
            AppError::Io(e) => format!("Could not read the dataset: {}.", e),
            AppError::InvalidArgument(detail) => format!("Invalid request: {}.", detail),
            AppError::Config(detail) => format!("Invalid configuration: {}.", detail),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Parse(detail) => AppError::Parse(detail),
            LoadError::Io(e) => AppError::Io(e),
            LoadError::Schema(e) => AppError::Schema(e),
        }
    }
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::NoDataset => AppError::NoDataset,
            InsightError::Schema(e) => AppError::Schema(e),
            InsightError::InvalidArgument(detail) => AppError::InvalidArgument(detail),
        }
    }
}

impl From<NoDatasetError> for AppError {
    fn from(_: NoDatasetError) -> Self {
        AppError::NoDataset
    }
}
