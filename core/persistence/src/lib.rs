//! FILENAME: core/persistence/src/lib.rs
//! Dataset loading and holding.
//!
//! Parses uploaded CSV bytes into an immutable `engine::Table` and keeps the
//! most recently loaded one available to the aggregation layer.

mod csv_reader;
mod error;
mod store;

pub use csv_reader::{load_csv, load_csv_file};
pub use error::{LoadError, NoDatasetError};
pub use store::DatasetStore;
