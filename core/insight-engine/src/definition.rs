//! FILENAME: core/insight-engine/src/definition.rs
//! Insight Definition - what a view over the dataset IS.
//!
//! This module contains the types needed to DESCRIBE an aggregation:
//! which column groups the rows, which column feeds the value, how the
//! value is aggregated and how many entries survive. These structures are
//! plain data; the engine module does the work.

use engine::columns;
use serde::{Deserialize, Serialize};

/// Number of entries kept by the "top N" rankings unless overridden.
pub const DEFAULT_TOP_N: usize = 10;

/// Number of entries kept for the sizes/colors breakdowns unless overridden.
pub const DEFAULT_CATEGORY_LIMIT: usize = 10;

/// Bucket count of the price distribution unless overridden.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// The `availability` value counted as stock on hand.
pub const IN_STOCK: &str = "In Stock";

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for a grouped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationType {
    /// Number of rows in the group. Needs no value column.
    Count,
    /// Sum of the non-missing values; a group with none sums to 0.
    Sum,
    /// Mean of the non-missing values; a group with none has no mean and is
    /// left out of the ranking.
    Mean,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Count
    }
}

// ============================================================================
// RANKING DEFINITION
// ============================================================================

/// Describes a grouped ranking: group rows by `group_by`, aggregate
/// `value_column` with `aggregation`, sort descending and keep `limit`.
///
/// Rows whose grouping key is missing belong to no group. Ties keep the
/// order in which their keys first appear in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingDefinition {
    pub group_by: String,

    /// Column aggregated per group. Ignored for `Count`.
    pub value_column: Option<String>,

    pub aggregation: AggregationType,

    /// Maximum number of entries. `None` keeps every group.
    pub limit: Option<usize>,
}

impl RankingDefinition {
    /// Ranks groups by how many rows they hold.
    pub fn count(group_by: &str) -> Self {
        RankingDefinition {
            group_by: group_by.to_string(),
            value_column: None,
            aggregation: AggregationType::Count,
            limit: None,
        }
    }

    /// Ranks groups by the mean of `value_column`.
    pub fn mean(group_by: &str, value_column: &str) -> Self {
        RankingDefinition {
            group_by: group_by.to_string(),
            value_column: Some(value_column.to_string()),
            aggregation: AggregationType::Mean,
            limit: None,
        }
    }

    /// Ranks groups by the sum of `value_column`.
    pub fn sum(group_by: &str, value_column: &str) -> Self {
        RankingDefinition {
            group_by: group_by.to_string(),
            value_column: Some(value_column.to_string()),
            aggregation: AggregationType::Sum,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

// ============================================================================
// INSIGHT SELECTION
// ============================================================================

/// The fixed set of views a request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    AvgRating,
    NumReviews,
    Availability,
    PriceDistribution,
    AvailableSizes,
    AvailableColors,
    Summary,
}

impl InsightKind {
    pub const ALL: [InsightKind; 7] = [
        InsightKind::AvgRating,
        InsightKind::NumReviews,
        InsightKind::Availability,
        InsightKind::PriceDistribution,
        InsightKind::AvailableSizes,
        InsightKind::AvailableColors,
        InsightKind::Summary,
    ];

    /// Stable identifier used on the command line and in logs.
    pub fn slug(self) -> &'static str {
        match self {
            InsightKind::AvgRating => "avg-rating",
            InsightKind::NumReviews => "num-reviews",
            InsightKind::Availability => "availability",
            InsightKind::PriceDistribution => "price-distribution",
            InsightKind::AvailableSizes => "available-sizes",
            InsightKind::AvailableColors => "available-colors",
            InsightKind::Summary => "summary",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Columns the view reads. Any one missing is a schema error.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            InsightKind::AvgRating => &[columns::NAME, columns::AVG_RATING],
            InsightKind::NumReviews => &[columns::NAME],
            InsightKind::Availability => &[columns::AVAILABILITY],
            InsightKind::PriceDistribution => &[columns::PRICE],
            InsightKind::AvailableSizes => &[columns::AVAILABLE_SIZES],
            InsightKind::AvailableColors => &[columns::COLOR],
            InsightKind::Summary => &[columns::NAME, columns::PRICE, columns::AVAILABILITY],
        }
    }
}

/// Tunables shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightOptions {
    /// Entries kept by the rating and review rankings.
    pub top_n: usize,

    /// Entries kept by the sizes/colors breakdowns (`None` keeps all).
    pub category_limit: Option<usize>,

    pub histogram_bins: usize,
}

impl Default for InsightOptions {
    fn default() -> Self {
        InsightOptions {
            top_n: DEFAULT_TOP_N,
            category_limit: Some(DEFAULT_CATEGORY_LIMIT),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
