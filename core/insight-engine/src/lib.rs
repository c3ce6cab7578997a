//! FILENAME: core/insight-engine/src/lib.rs
//! Aggregation subsystem for product/sales datasets.
//!
//! This crate turns a loaded `engine::Table` into the fixed set of views:
//! top-N rankings, categorical breakdowns, a price distribution and a KPI
//! summary. It depends on `engine` for the table and formatting and on
//! `persistence` only for the dataset holder.
//!
//! Layers:
//! - `definition`: What a view IS (rankings, insight kinds, options)
//! - `cache`: Single-pass grouping in first-appearance order
//! - `engine`: Calculation functions (HOW we aggregate)
//! - `view`: Renderer-neutral results (WHAT we computed)
//! - `presentation`: Labels and display strings for a renderer

pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod view;

pub use definition::*;
pub use error::InsightError;
pub use view::*;
pub use crate::engine::{
    build_summary, categorical_counts, histogram, price_histogram, rank, run_current,
    run_insight, top_by_mean_rating, top_by_review_count,
};
pub use presentation::{
    format_summary, histogram_to_chart_series, present, to_chart_series, ChartKind, ChartPoint,
    ChartSeries, ChartSpec, Presentation,
};
