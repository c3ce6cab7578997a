//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the value held by a single cell of a loaded dataset.
//! CONTEXT: A CSV field is classified once, at load time, into one of three
//! shapes. Numbers keep the field text they were read from, so a column can
//! be aggregated as numbers and still be grouped by exactly what the file said.

use serde::{Deserialize, Serialize};

/// Markers that read as "no value" in addition to the empty string.
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Represents the classified content of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Missing,
    Number { value: f64, raw: String },
    Text(String),
}

impl Value {
    /// Classifies a raw CSV field.
    /// Numbers are recognised on the trimmed field; both shapes keep the raw field.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || NA_MARKERS.contains(&raw) {
            return Value::Missing;
        }

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Value::Number {
                value,
                raw: raw.to_string(),
            },
            _ => Value::Text(raw.to_string()),
        }
    }

    /// The field text as it appeared in the source. Empty for missing cells.
    /// Used as the grouping key for categorical columns, so "007" and "7"
    /// stay distinct.
    pub fn raw(&self) -> &str {
        match self {
            Value::Missing => "",
            Value::Number { raw, .. } => raw,
            Value::Text(s) => s,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64, raw: &str) -> Value {
        Value::Number {
            value,
            raw: raw.to_string(),
        }
    }

    #[test]
    fn test_parse_classifies_fields() {
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("NaN"), Value::Missing);
        assert_eq!(Value::parse("null"), Value::Missing);
        assert_eq!(Value::parse("4.5"), number(4.5, "4.5"));
        assert_eq!(Value::parse(" 12 "), number(12.0, " 12 "));
        assert_eq!(Value::parse("In Stock"), Value::Text("In Stock".to_string()));
    }

    #[test]
    fn test_non_finite_stays_text() {
        assert_eq!(Value::parse("inf"), Value::Text("inf".to_string()));
    }

    #[test]
    fn test_text_keeps_surrounding_whitespace() {
        assert_eq!(Value::parse(" Red"), Value::Text(" Red".to_string()));
    }

    #[test]
    fn test_raw_keeps_source_text() {
        assert_eq!(Value::parse("007").raw(), "007");
        assert_eq!(Value::parse("7.0").raw(), "7.0");
        assert_eq!(
            Value::parse("12345678901234567891").raw(),
            "12345678901234567891"
        );
        assert_eq!(Value::parse("XL").raw(), "XL");
        assert_eq!(Value::Missing.raw(), "");
    }
}
