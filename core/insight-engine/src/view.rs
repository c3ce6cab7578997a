//! FILENAME: core/insight-engine/src/view.rs
//! Insight View - the renderer-neutral results of an aggregation.
//!
//! Nothing in here knows about markup or images. A renderer (chart library,
//! template engine, the CLI) consumes these as plain data or as JSON.

use serde::{Deserialize, Serialize};

// ============================================================================
// RANKED SERIES
// ============================================================================

/// One `(key, value)` pair of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub value: f64,
}

/// Ordered, de-duplicated key/value pairs, sorted by value descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedSeries {
    pub entries: Vec<RankedEntry>,
}

impl RankedSeries {
    pub fn new(entries: Vec<RankedEntry>) -> Self {
        RankedSeries { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// The pairs as owned tuples, mostly for assertions.
    pub fn to_pairs(&self) -> Vec<(String, f64)> {
        self.entries.iter().map(|e| (e.key.clone(), e.value)).collect()
    }
}

// ============================================================================
// HISTOGRAM
// ============================================================================

/// One equal-width bucket of a distribution.
/// Covers `[range_low, range_high)`, the last bucket also includes `range_high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub range_low: f64,
    pub range_high: f64,
    pub count: usize,
}

// ============================================================================
// SUMMARY REPORT
// ============================================================================

/// The KPI digest, one field per fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Number of rows in the dataset.
    pub total_sales: usize,
    /// Sum of `price`, missing prices contributing nothing.
    pub total_revenue: f64,
    /// Mean of the non-missing prices.
    pub average_price: Option<f64>,
    /// Name with the largest summed price.
    pub top_product: Option<String>,
    pub unique_products: usize,
    pub in_stock_count: usize,
}

/// Value of one summary fact, tagged with how it is displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FactValue {
    Count(usize),
    Money(Option<f64>),
    Identifier(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryFact {
    pub label: &'static str,
    pub value: FactValue,
}

impl SummaryReport {
    /// The six facts in their fixed display order.
    pub fn facts(&self) -> [SummaryFact; 6] {
        [
            SummaryFact {
                label: "Total Sales",
                value: FactValue::Count(self.total_sales),
            },
            SummaryFact {
                label: "Total Revenue",
                value: FactValue::Money(Some(self.total_revenue)),
            },
            SummaryFact {
                label: "Average Price",
                value: FactValue::Money(self.average_price),
            },
            SummaryFact {
                label: "Top Selling Product",
                value: FactValue::Identifier(self.top_product.clone()),
            },
            SummaryFact {
                label: "Total Unique Products",
                value: FactValue::Count(self.unique_products),
            },
            SummaryFact {
                label: "Total Available Stock",
                value: FactValue::Count(self.in_stock_count),
            },
        ]
    }
}

// ============================================================================
// DISPATCH OUTPUT
// ============================================================================

/// Result of running one `InsightKind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InsightOutput {
    Ranking(RankedSeries),
    Histogram(Vec<HistogramBucket>),
    Summary(SummaryReport),
}
