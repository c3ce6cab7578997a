// FILENAME: core/persistence/src/csv_reader.rs

use crate::LoadError;
use engine::{Table, Value};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses CSV bytes (header row first) into a `Table`.
///
/// Every data row must have exactly as many fields as the header. No schema
/// checks happen here; aggregations check the columns they read.
pub fn load_csv(bytes: &[u8]) -> Result<Table, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Parse("input is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Parse("missing header row".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::parse).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

/// Reads a CSV file from disk and parses it.
pub fn load_csv_file(path: &Path) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path)?;
    load_csv(&bytes)
}
