//! FILENAME: core/insight-engine/src/engine.rs
//! Insight Engine - the calculation core that turns a table into views.
//!
//! Every function here reads an immutable `Table` and builds a fresh result.
//! Column access is checked up front, so a view either comes back whole or
//! fails with a schema error; nothing is computed from half a dataset.
//!
//! Ranking algorithm:
//! 1. Read the grouping column (and value column, if any) from the table
//! 2. Build a `GroupCache` in a single pass (groups in first-appearance order)
//! 3. Compute one aggregate per group, dropping undefined ones
//! 4. Stable sort descending, so ties keep first-appearance order
//! 5. Truncate to the requested length

use std::cmp::Ordering;

use engine::{columns, Table};
use log::debug;
use persistence::DatasetStore;

use crate::cache::GroupCache;
use crate::definition::{
    AggregationType, InsightKind, InsightOptions, RankingDefinition, IN_STOCK,
};
use crate::error::InsightError;
use crate::view::{HistogramBucket, InsightOutput, RankedEntry, RankedSeries, SummaryReport};

// ============================================================================
// RANKINGS
// ============================================================================

/// Computes a grouped ranking as described by `definition`.
pub fn rank(table: &Table, definition: &RankingDefinition) -> Result<RankedSeries, InsightError> {
    let keys = table.categorical_column(&definition.group_by)?;

    let values = match (definition.aggregation, &definition.value_column) {
        (AggregationType::Count, _) => None,
        (_, Some(column)) => Some(table.numeric_column(column)?),
        (aggregation, None) => {
            return Err(InsightError::InvalidArgument(format!(
                "{:?} ranking over '{}' needs a value column",
                aggregation, definition.group_by
            )))
        }
    };

    let cache = GroupCache::build(&keys, values.as_deref());

    let mut entries: Vec<RankedEntry> = cache
        .iter()
        .filter_map(|(key, acc)| {
            acc.compute(definition.aggregation).map(|value| RankedEntry {
                key: key.to_string(),
                value,
            })
        })
        .collect();

    // `sort_by` is stable: equal values stay in first-appearance order.
    entries.sort_by(|a, b| compare_descending(a.value, b.value));

    if let Some(limit) = definition.limit {
        entries.truncate(limit);
    }

    debug!(
        "ranked {} groups of '{}' by {:?}, kept {}",
        cache.len(),
        definition.group_by,
        definition.aggregation,
        entries.len()
    );

    Ok(RankedSeries::new(entries))
}

fn compare_descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Products ranked by their mean `avg_rating`.
/// Products without any rating are left out.
pub fn top_by_mean_rating(table: &Table, n: usize) -> Result<RankedSeries, InsightError> {
    rank(
        table,
        &RankingDefinition::mean(columns::NAME, columns::AVG_RATING).with_limit(Some(n)),
    )
}

/// Products ranked by how many rows (reviews) they have.
pub fn top_by_review_count(table: &Table, n: usize) -> Result<RankedSeries, InsightError> {
    rank(table, &RankingDefinition::count(columns::NAME).with_limit(Some(n)))
}

/// Occurrence counts of each distinct value of a categorical column.
pub fn categorical_counts(
    table: &Table,
    column: &str,
    limit: Option<usize>,
) -> Result<RankedSeries, InsightError> {
    rank(table, &RankingDefinition::count(column).with_limit(limit))
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

/// Splits the observed `price` range into `bins` equal-width buckets.
///
/// The last bucket is closed on the right so the maximum is counted. When
/// every price is the same value `v`, the range is widened to
/// `[v - 0.5, v + 0.5]` and exactly one bucket ends up non-empty.
pub fn price_histogram(table: &Table, bins: usize) -> Result<Vec<HistogramBucket>, InsightError> {
    histogram(table, columns::PRICE, bins)
}

/// Equal-width histogram of any numeric column.
pub fn histogram(table: &Table, column: &str, bins: usize) -> Result<Vec<HistogramBucket>, InsightError> {
    if bins == 0 {
        return Err(InsightError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let values: Vec<f64> = table.numeric_column(column)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    // Halved operands keep the span finite even when `high - low` overflows.
    let half_span = high / 2.0 - low / 2.0;
    let mut counts = vec![0usize; bins];

    for v in &values {
        let fraction = (v / 2.0 - low / 2.0) / half_span;
        let slot = (fraction * bins as f64).floor() as usize;
        counts[slot.min(bins - 1)] += 1;
    }

    let edge = |i: usize| {
        if i == bins {
            high
        } else {
            let t = i as f64 / bins as f64;
            low * (1.0 - t) + high * t
        }
    };

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            range_low: edge(i),
            range_high: edge(i + 1),
            count,
        })
        .collect();

    Ok(buckets)
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Builds the KPI digest.
pub fn build_summary(table: &Table) -> Result<SummaryReport, InsightError> {
    // Fetch every column first: a missing one fails the whole report.
    let names = table.categorical_column(columns::NAME)?;
    let prices = table.numeric_column(columns::PRICE)?;
    let availability = table.categorical_column(columns::AVAILABILITY)?;

    let (total_revenue, priced_rows) = prices
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), p| (sum + p, n + 1));

    let average_price = if priced_rows > 0 {
        Some(total_revenue / priced_rows as f64)
    } else {
        None
    };

    let by_name = GroupCache::build(&names, Some(prices.as_slice()));

    // Strictly greater keeps the first-appearing name on ties.
    let mut top_product: Option<(&str, f64)> = None;
    for (name, acc) in by_name.iter() {
        let revenue = acc.sum;
        match top_product {
            Some((_, best)) if revenue <= best => {}
            _ => top_product = Some((name, revenue)),
        }
    }

    let in_stock_count = availability
        .iter()
        .filter(|a| a.as_deref() == Some(IN_STOCK))
        .count();

    Ok(SummaryReport {
        total_sales: table.row_count(),
        total_revenue,
        average_price,
        top_product: top_product.map(|(name, _)| name.to_string()),
        unique_products: by_name.len(),
        in_stock_count,
    })
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Runs one view over `table`.
pub fn run_insight(
    table: &Table,
    kind: InsightKind,
    options: &InsightOptions,
) -> Result<InsightOutput, InsightError> {
    let output = match kind {
        InsightKind::AvgRating => InsightOutput::Ranking(top_by_mean_rating(table, options.top_n)?),
        InsightKind::NumReviews => InsightOutput::Ranking(top_by_review_count(table, options.top_n)?),
        InsightKind::Availability => {
            InsightOutput::Ranking(categorical_counts(table, columns::AVAILABILITY, None)?)
        }
        InsightKind::PriceDistribution => {
            InsightOutput::Histogram(price_histogram(table, options.histogram_bins)?)
        }
        InsightKind::AvailableSizes => InsightOutput::Ranking(categorical_counts(
            table,
            columns::AVAILABLE_SIZES,
            options.category_limit,
        )?),
        InsightKind::AvailableColors => InsightOutput::Ranking(categorical_counts(
            table,
            columns::COLOR,
            options.category_limit,
        )?),
        InsightKind::Summary => InsightOutput::Summary(build_summary(table)?),
    };

    Ok(output)
}

/// Runs one view over the store's current dataset.
pub fn run_current(
    store: &DatasetStore,
    kind: InsightKind,
    options: &InsightOptions,
) -> Result<InsightOutput, InsightError> {
    let table = store.require()?;
    run_insight(&table, kind, options)
}
