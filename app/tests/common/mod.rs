//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for sales-insight integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use app_lib::{create_app_state, load_dataset_bytes, AppState, DatasetInfo, InsightConfig};
use tempfile::NamedTempFile;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with no dataset loaded.
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        TestHarness {
            state: create_app_state(config),
        }
    }

    /// Create a harness with the sales fixture loaded.
    pub fn with_sample_data() -> Self {
        let harness = Self::new();
        harness.load(SalesFixture::csv().as_bytes());
        harness
    }

    /// Loads CSV text, panicking on failure.
    pub fn load(&self, csv: &[u8]) -> DatasetInfo {
        load_dataset_bytes(&self.state, csv).expect("fixture should load")
    }

    pub fn row_count(&self) -> usize {
        self.state
            .store
            .current()
            .map(|t| t.row_count())
            .unwrap_or(0)
    }
}

/// Sample product/sales dataset.
pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["name", "avg_rating", "availability", "price", "available_sizes", "color"]
    }

    /// (name, avg_rating, availability, price, available_sizes, color)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, &'static str, &'static str)> {
        vec![
            ("Trail Runner", "4.5", "In Stock", "120.00", "9", "Black"),
            ("Trail Runner", "3.5", "In Stock", "120.00", "10", "Black"),
            ("Canvas Tote", "4", "Out Of Stock", "35.50", "One Size", "Beige"),
            ("Rain Shell", "", "In Stock", "1499.99", "M", "Navy"),
            ("Trail Runner", "5", "Out Of Stock", "110.00", "9", "Red"),
            ("Wool Beanie", "2", "In Stock", "", "One Size", "Black"),
            ("Canvas Tote", "3", "In Stock", "35.50", "One Size", "Navy"),
        ]
    }

    /// The fixture as CSV text with a header row.
    pub fn csv() -> String {
        let mut builder = CsvBuilder::new(&Self::headers());
        for (name, rating, availability, price, sizes, color) in Self::data() {
            builder = builder.row(&[name, rating, availability, price, sizes, color]);
        }
        builder.build()
    }
}

/// Builds CSV text row by row.
pub struct CsvBuilder {
    text: String,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        CsvBuilder {
            text: format!("{}\n", headers.join(",")),
        }
    }

    pub fn row(mut self, fields: &[&str]) -> Self {
        self.text.push_str(&fields.join(","));
        self.text.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Writes `contents` to a temporary `.csv` file kept alive by the handle.
pub fn temp_csv(contents: &str) -> (NamedTempFile, PathBuf) {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    let path = file.path().to_path_buf();
    (file, path)
}
