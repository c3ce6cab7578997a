//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The loaded dataset (rows x named columns).
//! CONTEXT: A `Table` is built once by the loader and never mutated after
//! that. Data is stored column-wise because every aggregation walks one or
//! two columns end to end. Column access is checked lazily: asking for a
//! column that is not there is a `SchemaError` at the point of use.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::value::Value;

/// Column names the aggregation views read.
pub mod columns {
    pub const NAME: &str = "name";
    pub const AVG_RATING: &str = "avg_rating";
    pub const AVAILABILITY: &str = "availability";
    pub const PRICE: &str = "price";
    pub const AVAILABLE_SIZES: &str = "available_sizes";
    pub const COLOR: &str = "color";

    /// Every column at least one view depends on.
    pub const REQUIRED: &[&str] = &[NAME, AVG_RATING, AVAILABILITY, PRICE, AVAILABLE_SIZES, COLOR];
}

/// An immutable, column-oriented dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Header names in source order, de-duplicated.
    headers: Vec<String>,

    /// One vector per header, each `row_count` long.
    columns: Vec<Vec<Value>>,

    /// Header name -> column index.
    index: HashMap<String, usize>,

    row_count: usize,
}

impl Table {
    /// Builds a table from a header row and data rows.
    /// Short rows are padded with `Value::Missing`, extra fields are dropped.
    /// Repeated header names get a `.1`, `.2`, ... suffix so every column
    /// stays addressable.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let headers = dedupe_headers(headers);
        let width = headers.len();
        let row_count = rows.len();

        let mut columns: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for row in rows {
            let mut fields = row.into_iter();
            for column in columns.iter_mut() {
                column.push(fields.next().unwrap_or(Value::Missing));
            }
        }

        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Table {
            headers,
            columns,
            index,
            row_count,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Retrieves a single cell. Returns None when out of range.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = *self.index.get(column)?;
        self.columns[col].get(row)
    }

    /// Raw access to a column's values.
    pub fn column(&self, name: &str) -> Result<&[Value], SchemaError> {
        self.index
            .get(name)
            .map(|&i| self.columns[i].as_slice())
            .ok_or_else(|| SchemaError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Reads a column as numbers. Missing cells become `None`.
    /// Fails if any cell holds text, since the column is then not numeric.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        self.column(name)?
            .iter()
            .enumerate()
            .map(|(row, value)| match value {
                Value::Missing => Ok(None),
                Value::Number { value, .. } => Ok(Some(*value)),
                Value::Text(s) => Err(SchemaError::NonNumeric {
                    column: name.to_string(),
                    row: row + 1,
                    value: s.clone(),
                }),
            })
            .collect()
    }

    /// Reads a column as grouping keys. Missing cells become `None`,
    /// everything else its source text, numbers included.
    pub fn categorical_column(&self, name: &str) -> Result<Vec<Option<String>>, SchemaError> {
        Ok(self
            .column(name)?
            .iter()
            .map(|value| match value {
                Value::Missing => None,
                other => Some(other.raw().to_string()),
            })
            .collect())
    }

    /// Checks that every listed column exists.
    /// Reports the first missing one in the order given.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), SchemaError> {
        match names.iter().find(|n| !self.has_column(n)) {
            Some(missing) => Err(SchemaError::MissingColumn {
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let mut candidate = header.clone();
        if let Some(&last) = seen.get(&header) {
            let mut n = last;
            loop {
                n += 1;
                candidate = format!("{}.{}", header, n);
                if !seen.contains_key(&candidate) {
                    break;
                }
            }
            seen.insert(header, n);
        }
        seen.insert(candidate.clone(), 0);
        out.push(candidate);
    }

    out
}
