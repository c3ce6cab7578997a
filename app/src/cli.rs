//! FILENAME: app/src/cli.rs
//! PURPOSE: Command-line entry point: parse flags, load the dataset, run views.
//! CONTEXT: Rendered views go to the writer handed to `run` (stdout in the
//! binary); notices and log lines go to stderr.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use insight_engine::InsightKind;
use serde::Serialize;

use crate::commands::{load_dataset, render_text, run_insight, DatasetInfo, InsightResponse};
use crate::config::InsightConfig;
use crate::error::AppError;
use crate::logging::init_logging;
use crate::{create_app_state, log_error, log_info};

pub const EXIT_OK: u8 = 0;
/// At least one view failed; the others were still rendered.
pub const EXIT_INSIGHT_FAILED: u8 = 1;
/// Nothing was rendered: the configuration or the dataset was rejected.
pub const EXIT_LOAD_FAILED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InsightArg {
    AvgRating,
    NumReviews,
    Availability,
    PriceDistribution,
    AvailableSizes,
    AvailableColors,
    Summary,
    All,
}

impl InsightArg {
    fn kinds(self) -> Vec<InsightKind> {
        match self {
            InsightArg::AvgRating => vec![InsightKind::AvgRating],
            InsightArg::NumReviews => vec![InsightKind::NumReviews],
            InsightArg::Availability => vec![InsightKind::Availability],
            InsightArg::PriceDistribution => vec![InsightKind::PriceDistribution],
            InsightArg::AvailableSizes => vec![InsightKind::AvailableSizes],
            InsightArg::AvailableColors => vec![InsightKind::AvailableColors],
            InsightArg::Summary => vec![InsightKind::Summary],
            InsightArg::All => InsightKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Aggregate views over a product/sales CSV.
#[derive(Debug, Parser)]
#[command(name = "sales-insight", version)]
pub struct Cli {
    /// CSV dataset to analyze
    pub dataset: PathBuf,

    /// Views to render, in order (default: all)
    #[arg(value_enum)]
    pub insights: Vec<InsightArg>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Entries kept by the rating and review rankings
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Entries kept by the sizes/colors breakdowns
    #[arg(long)]
    pub category_limit: Option<usize>,

    /// Bucket count of the price distribution
    #[arg(long)]
    pub bins: Option<usize>,

    /// Reject datasets missing any required column
    #[arg(long)]
    pub strict: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Views to run, with duplicates removed and request order kept.
    pub fn requested_kinds(&self) -> Vec<InsightKind> {
        let mut kinds: Vec<InsightKind> = Vec::new();
        let requested = if self.insights.is_empty() {
            vec![InsightArg::All]
        } else {
            self.insights.clone()
        };
        for kind in requested.into_iter().flat_map(InsightArg::kinds) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// File configuration (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<InsightConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => InsightConfig::load(path)?,
            None => InsightConfig::default(),
        };

        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        if let Some(n) = self.category_limit {
            config.category_limit = Some(n);
        }
        if let Some(n) = self.bins {
            config.histogram_bins = n;
        }
        if self.strict {
            config.strict_schema = true;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file.clone();
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// JSON REPORT
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonResult {
    Ok(InsightResponse),
    Error { insight: InsightKind, notice: String },
}

#[derive(Debug, Serialize)]
struct JsonReport {
    dataset: DatasetInfo,
    results: Vec<JsonResult>,
}

// ============================================================================
// RUN
// ============================================================================

/// Runs the command and returns the process exit code.
pub fn run(cli: &Cli, out: &mut impl Write) -> u8 {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.notice());
            return EXIT_LOAD_FAILED;
        }
    };

    let level = match config.level_filter() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e.notice());
            return EXIT_LOAD_FAILED;
        }
    };
    if let Err(e) = init_logging(level, config.log_file.as_deref()) {
        eprintln!("{}", AppError::Config(e).notice());
        return EXIT_LOAD_FAILED;
    }

    let kinds = cli.requested_kinds();
    let format = cli.format;
    let state = create_app_state(config);

    let dataset = match load_dataset(&state, &cli.dataset) {
        Ok(info) => info,
        Err(e) => {
            log_error!("LOAD", "{}", e);
            eprintln!("{}", e.notice());
            return EXIT_LOAD_FAILED;
        }
    };
    log_info!(
        "CLI",
        "loaded {} rows, running {} view(s)",
        dataset.rows,
        kinds.len()
    );

    let mut failed = false;
    let mut results = Vec::with_capacity(kinds.len());

    for kind in kinds {
        match run_insight(&state, kind) {
            Ok(response) => {
                if format == OutputFormat::Text {
                    if let Err(e) = write_text(out, &response) {
                        log_error!("CLI", "failed to write {}: {}", kind.slug(), e);
                        return EXIT_INSIGHT_FAILED;
                    }
                } else {
                    results.push(JsonResult::Ok(response));
                }
            }
            Err(e) => {
                failed = true;
                let notice = e.notice();
                eprintln!("{}: {}", kind.slug(), notice);
                if format == OutputFormat::Json {
                    results.push(JsonResult::Error { insight: kind, notice });
                }
            }
        }
    }

    if format == OutputFormat::Json {
        let report = JsonReport { dataset, results };
        let written = serde_json::to_string_pretty(&report)
            .map_err(|e| e.to_string())
            .and_then(|json| writeln!(out, "{}", json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            log_error!("CLI", "failed to write report: {}", e);
            return EXIT_INSIGHT_FAILED;
        }
    }

    if failed {
        EXIT_INSIGHT_FAILED
    } else {
        EXIT_OK
    }
}

fn write_text(out: &mut impl Write, response: &InsightResponse) -> std::io::Result<()> {
    writeln!(out, "{}", render_text(response))
}
