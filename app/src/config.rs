//! FILENAME: app/src/config.rs
//! PURPOSE: Runtime configuration, read from an optional JSON file.
//! CONTEXT: Every field has a default, so an empty object (or no file at all)
//! is a valid configuration. Command-line flags override file values.

use std::path::{Path, PathBuf};

use insight_engine::{InsightOptions, DEFAULT_CATEGORY_LIMIT, DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_N};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::logging::parse_level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsightConfig {
    /// Entries kept by the rating and review rankings.
    pub top_n: usize,

    /// Entries kept by the sizes/colors breakdowns. `null` keeps all.
    pub category_limit: Option<usize>,

    pub histogram_bins: usize,

    /// Reject datasets missing any required column at load time instead of
    /// failing each affected view.
    pub strict_schema: bool,

    pub log_file: Option<PathBuf>,

    /// One of "off", "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        InsightConfig {
            top_n: DEFAULT_TOP_N,
            category_limit: Some(DEFAULT_CATEGORY_LIMIT),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            strict_schema: false,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl InsightConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        let config: InsightConfig =
            serde_json::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.histogram_bins == 0 {
            return Err(AppError::Config("histogram_bins must be at least 1".to_string()));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, AppError> {
        parse_level(&self.log_level)
            .ok_or_else(|| AppError::Config(format!("unknown log_level '{}'", self.log_level)))
    }

    /// The engine tunables carried by this configuration.
    pub fn options(&self) -> InsightOptions {
        InsightOptions {
            top_n: self.top_n,
            category_limit: self.category_limit,
            histogram_bins: self.histogram_bins,
        }
    }
}
