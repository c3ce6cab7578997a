//! FILENAME: app/src/commands.rs
//! PURPOSE: Boundary operations: load a dataset, run a view, render it.
//! CONTEXT: Each command takes the shared `AppState`, logs what it does and
//! returns either a serializable response or an `AppError` with a notice.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;

use engine::columns;
use insight_engine::{present, run_current, InsightKind, InsightOutput, Presentation};
use serde::Serialize;

use crate::error::AppError;
use crate::{log_debug, log_info, log_warn, AppState};

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// What a successful load reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Required columns the dataset lacks. Views needing them will fail.
    pub missing_columns: Vec<String>,
}

/// One rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub insight: InsightKind,
    pub output: InsightOutput,
    pub presentation: Presentation,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Loads CSV bytes as the current dataset.
/// A failed load leaves the previous dataset in place.
pub fn load_dataset_bytes(state: &AppState, bytes: &[u8]) -> Result<DatasetInfo, AppError> {
    log_info!("LOAD", "load_dataset_bytes len={} strict={}", bytes.len(), state.config.strict_schema);

    let table = if state.config.strict_schema {
        state.store.load_validated(bytes, columns::REQUIRED)?
    } else {
        state.store.load(bytes)?
    };

    let missing_columns: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if !missing_columns.is_empty() {
        log_warn!("LOAD", "dataset lacks columns {:?}", missing_columns);
    }

    Ok(DatasetInfo {
        rows: table.row_count(),
        columns: table.headers().to_vec(),
        missing_columns,
    })
}

/// Loads a CSV file as the current dataset.
pub fn load_dataset(state: &AppState, path: &Path) -> Result<DatasetInfo, AppError> {
    log_info!("LOAD", "load_dataset path={:?}", path);
    if path.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("csv")) != Some(true) {
        log_warn!("LOAD", "file {:?} does not have a .csv extension", path);
    }
    let bytes = std::fs::read(path)?;
    load_dataset_bytes(state, &bytes)
}

/// Runs one view over the current dataset and prepares it for rendering.
pub fn run_insight(state: &AppState, kind: InsightKind) -> Result<InsightResponse, AppError> {
    let start = Instant::now();
    let options = state.config.options();

    let output = run_current(&state.store, kind, &options).map_err(|e| {
        log_warn!("INSIGHT", "{} failed: {}", kind.slug(), e);
        AppError::from(e)
    })?;
    let presentation = present(kind, &output, &options);

    log_debug!("INSIGHT", "{} done in {:?}", kind.slug(), start.elapsed());

    Ok(InsightResponse {
        insight: kind,
        output,
        presentation,
    })
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// Plain-text rendering of a view for terminal output.
pub fn render_text(response: &InsightResponse) -> String {
    let mut out = String::new();

    match &response.presentation {
        Presentation::Summary(lines) => {
            let _ = writeln!(out, "== Summary ==");
            for line in lines {
                let _ = writeln!(out, "{}", line);
            }
        }
        Presentation::Chart(chart) => {
            let _ = writeln!(out, "== {} ==", chart.spec.title);
            if !chart.spec.description.is_empty() {
                let _ = writeln!(out, "{}", chart.spec.description);
            }
            if chart.points.is_empty() {
                let _ = writeln!(out, "(no data)");
            }

            let width = chart
                .points
                .iter()
                .map(|p| p.label.chars().count())
                .max()
                .unwrap_or(0)
                .max(chart.spec.x_label.chars().count());

            if !chart.points.is_empty() {
                let _ = writeln!(out, "{:<width$}  {}", chart.spec.x_label, chart.spec.y_label, width = width);
            }
            for point in &chart.points {
                let _ = writeln!(
                    out,
                    "{:<width$}  {}",
                    point.label,
                    format_point_value(point.value),
                    width = width
                );
            }
        }
    }

    out
}

fn format_point_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;
    use crate::create_app_state;

    const SCENARIO: &[u8] = b"name,avg_rating,price,availability,available_sizes,color\n\
        A,4,10,In Stock,M,Red\nA,2,20,Out Of Stock,L,Blue\nB,5,30,In Stock,M,Red\n";

    #[test]
    fn test_run_before_load_is_no_dataset() {
        let state = create_app_state(InsightConfig::default());
        let err = run_insight(&state, InsightKind::Summary).unwrap_err();
        assert!(matches!(err, AppError::NoDataset));
        assert_eq!(err.notice(), "Please upload a dataset first.");
    }

    #[test]
    fn test_load_reports_missing_columns() {
        let state = create_app_state(InsightConfig::default());
        let info = load_dataset_bytes(&state, b"name,price\nA,1\n").unwrap();
        assert_eq!(info.rows, 1);
        assert_eq!(
            info.missing_columns,
            vec!["avg_rating", "availability", "available_sizes", "color"]
        );
    }

    #[test]
    fn test_strict_load_rejects_missing_columns() {
        let config = InsightConfig {
            strict_schema: true,
            ..InsightConfig::default()
        };
        let state = create_app_state(config);
        let err = load_dataset_bytes(&state, b"name,price\nA,1\n").unwrap_err();
        assert!(matches!(err, AppError::Schema(_)));
        assert!(!state.store.is_loaded());
    }

    #[test]
    fn test_render_summary_text() {
        let state = create_app_state(InsightConfig::default());
        load_dataset_bytes(&state, SCENARIO).unwrap();
        let text = render_text(&run_insight(&state, InsightKind::Summary).unwrap());
        assert!(text.starts_with("== Summary ==\n"));
        assert!(text.contains("Total Revenue: $60.00\n"));
        assert!(text.contains("Top Selling Product: A\n"));
    }

    #[test]
    fn test_render_chart_text() {
        let state = create_app_state(InsightConfig::default());
        load_dataset_bytes(&state, SCENARIO).unwrap();
        let text = render_text(&run_insight(&state, InsightKind::AvgRating).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Top 10 Products by Average Rating ==");
        assert_eq!(lines[2], "Product Name  Average Rating");
        assert_eq!(lines[3], "B             5");
        assert_eq!(lines[4], "A             3");
    }

    #[test]
    fn test_format_point_value() {
        assert_eq!(format_point_value(3.0), "3");
        assert_eq!(format_point_value(3.456), "3.46");
    }
}
