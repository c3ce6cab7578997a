//! FILENAME: app/src/lib.rs
// PURPOSE: Application boundary around the insight engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

use persistence::DatasetStore;

pub use cli::{run, Cli, InsightArg, OutputFormat, EXIT_INSIGHT_FAILED, EXIT_LOAD_FAILED, EXIT_OK};
pub use commands::{load_dataset, load_dataset_bytes, render_text, run_insight, DatasetInfo, InsightResponse};
pub use config::InsightConfig;
pub use error::{AppError, NOTICE_NO_DATASET};
pub use logging::{init_logging, write_log};

/// Shared state for every command: the current dataset and the settings
/// the views run with.
pub struct AppState {
    pub store: DatasetStore,
    pub config: InsightConfig,
}

pub fn create_app_state(config: InsightConfig) -> AppState {
    AppState {
        store: DatasetStore::new(),
        config,
    }
}
