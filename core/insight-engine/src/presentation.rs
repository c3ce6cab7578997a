//! FILENAME: core/insight-engine/src/presentation.rs
//! Presentation Adapter - maps engine output to renderer-ready structures.
//!
//! Stateless and deterministic. Charts get their labels attached here; the
//! summary gets its display strings here. No aggregation happens in this
//! module.

use engine::number_format::{format_count, format_number, presets};
use serde::{Deserialize, Serialize};

use crate::definition::{InsightKind, InsightOptions};
use crate::view::{FactValue, HistogramBucket, InsightOutput, RankedSeries, SummaryReport};

/// Shown for a fact that has no value (e.g. the mean of zero prices).
pub const NOT_AVAILABLE: &str = "n/a";

// ============================================================================
// CHART TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Histogram,
}

/// Labels and chart type attached to a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub description: String,
}

impl ChartSpec {
    pub fn new(title: &str, x_label: &str, y_label: &str, kind: ChartKind) -> Self {
        ChartSpec {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The preset for a chart view. `None` for the summary, which is text.
    pub fn for_insight(kind: InsightKind, options: &InsightOptions) -> Option<Self> {
        let top_n = options.top_n;
        let category = options
            .category_limit
            .map(|n| format!("Top {} ", n))
            .unwrap_or_default();

        let spec = match kind {
            InsightKind::AvgRating => ChartSpec::new(
                &format!("Top {} Products by Average Rating", top_n),
                "Product Name",
                "Average Rating",
                ChartKind::Bar,
            )
            .with_description(format!(
                "This graph shows the top {} products based on their average rating.",
                top_n
            )),
            InsightKind::NumReviews => ChartSpec::new(
                &format!("Top {} Products by Number of Reviews", top_n),
                "Product Name",
                "Number of Reviews",
                ChartKind::Bar,
            )
            .with_description(format!(
                "This graph shows the top {} products based on the number of reviews.",
                top_n
            )),
            InsightKind::Availability => ChartSpec::new(
                "Product Availability (In Stock vs Out Of Stock)",
                "Availability",
                "Count",
                ChartKind::Bar,
            )
            .with_description(
                "This graph shows the availability of products in stock vs. out of stock.",
            ),
            InsightKind::PriceDistribution => {
                ChartSpec::new("Price Distribution", "Price", "Frequency", ChartKind::Histogram)
                    .with_description("This graph shows the distribution of product prices.")
            }
            InsightKind::AvailableSizes => ChartSpec::new(
                &format!("{}Available Sizes", category),
                "Size",
                "Count",
                ChartKind::Bar,
            )
            .with_description(format!(
                "This graph shows the {}available sizes.",
                category.to_lowercase()
            )),
            InsightKind::AvailableColors => ChartSpec::new(
                &format!("{}Available Colors", category),
                "Color",
                "Count",
                ChartKind::Pie,
            )
            .with_description(format!(
                "This graph shows the {}available colors.",
                category.to_lowercase()
            )),
            InsightKind::Summary => return None,
        };

        Some(spec)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A labelled series ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(flatten)]
    pub spec: ChartSpec,
    pub points: Vec<ChartPoint>,
}

// ============================================================================
// ADAPTERS
// ============================================================================

/// Attaches labels to a ranking. Order and values pass through unchanged.
pub fn to_chart_series(series: &RankedSeries, spec: ChartSpec) -> ChartSeries {
    ChartSeries {
        spec,
        points: series
            .entries
            .iter()
            .map(|e| ChartPoint {
                label: e.key.clone(),
                value: e.value,
            })
            .collect(),
    }
}

/// One point per bucket, labelled with its range.
pub fn histogram_to_chart_series(buckets: &[HistogramBucket], spec: ChartSpec) -> ChartSeries {
    let bound = presets::number_with_separators(2);
    ChartSeries {
        spec,
        points: buckets
            .iter()
            .map(|b| ChartPoint {
                label: format!(
                    "{}–{}",
                    format_number(b.range_low, &bound),
                    format_number(b.range_high, &bound)
                ),
                value: b.count as f64,
            })
            .collect(),
    }
}

/// The summary as display lines, in fixed order.
/// Money is `$` with two decimals and thousands separators, counts are plain
/// integers, the top product is shown as-is.
pub fn format_summary(report: &SummaryReport) -> Vec<String> {
    let money = presets::currency_usd(2);

    report
        .facts()
        .iter()
        .map(|fact| {
            let shown = match &fact.value {
                FactValue::Count(n) => format_count(*n),
                FactValue::Money(Some(amount)) => format_number(*amount, &money),
                FactValue::Identifier(Some(name)) => name.clone(),
                FactValue::Money(None) | FactValue::Identifier(None) => NOT_AVAILABLE.to_string(),
            };
            format!("{}: {}", fact.label, shown)
        })
        .collect()
}

/// What a renderer receives for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Presentation {
    Chart(ChartSeries),
    Summary(Vec<String>),
}

/// Maps a view's output to its renderer-ready form.
pub fn present(kind: InsightKind, output: &InsightOutput, options: &InsightOptions) -> Presentation {
    match (output, ChartSpec::for_insight(kind, options)) {
        (InsightOutput::Summary(report), _) => Presentation::Summary(format_summary(report)),
        (InsightOutput::Ranking(series), Some(spec)) => Presentation::Chart(to_chart_series(series, spec)),
        (InsightOutput::Histogram(buckets), Some(spec)) => {
            Presentation::Chart(histogram_to_chart_series(buckets, spec))
        }
        (InsightOutput::Ranking(series), None) => Presentation::Chart(to_chart_series(
            series,
            ChartSpec::new(kind.slug(), "", "", ChartKind::Bar),
        )),
        (InsightOutput::Histogram(buckets), None) => Presentation::Chart(histogram_to_chart_series(
            buckets,
            ChartSpec::new(kind.slug(), "", "", ChartKind::Histogram),
        )),
    }
}
