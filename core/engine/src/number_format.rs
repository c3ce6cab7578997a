//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying aggregate values.
//! CONTEXT: This module handles the conversion of raw numeric values to
//! formatted display strings (counts, currency amounts, bucket bounds).

use serde::{Deserialize, Serialize};

/// How a number should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberFormat {
    Number {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
    /// Symbol first, thousands separators always on, negatives as `$-1,234.50`.
    Currency { decimal_places: u8, symbol: String },
}

/// Format a number according to the specified format.
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    match format {
        NumberFormat::Number {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
        NumberFormat::Currency {
            decimal_places,
            symbol,
        } => format_currency(value, *decimal_places, symbol),
    }
}

/// Format a count as a plain integer.
pub fn format_count(count: usize) -> String {
    count.to_string()
}

/// Format a number with specified decimal places and optional thousands separator.
fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }

    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Format a number as currency, always with thousands separators.
fn format_currency(value: f64, decimal_places: u8, symbol: &str) -> String {
    let magnitude = add_thousands_separator(&format!(
        "{:.prec$}",
        value.abs(),
        prec = decimal_places as usize
    ));
    // Rounding can turn a tiny negative into zero; "-0.00" is not useful.
    let negative = value < 0.0 && magnitude.chars().any(|c| c.is_ascii_digit() && c != '0');

    if negative {
        format!("{}-{}", symbol, magnitude)
    } else {
        format!("{}{}", symbol, magnitude)
    }
}

/// Predefined number formats for common use cases.
pub mod presets {
    use super::*;

    pub fn number_with_separators(decimal_places: u8) -> NumberFormat {
        NumberFormat::Number {
            decimal_places,
            use_thousands_separator: true,
        }
    }

    pub fn currency_usd(decimal_places: u8) -> NumberFormat {
        NumberFormat::Currency {
            decimal_places,
            symbol: "$".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.567, 2, false), "1234.57");
        assert_eq!(format_decimal(1234.567, 2, true), "1,234.57");
        assert_eq!(format_decimal(1000000.0, 0, true), "1,000,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_number(1234.56, &presets::currency_usd(2)),
            "$1,234.56"
        );
        assert_eq!(
            format_number(-1234.5, &presets::currency_usd(2)),
            "$-1,234.50"
        );
        assert_eq!(
            format_number(1234567.891, &presets::number_with_separators(2)),
            "1,234,567.89"
        );
    }

    #[test]
    fn test_currency_rounds_away_negative_zero() {
        assert_eq!(format_number(-0.001, &presets::currency_usd(2)), "$0.00");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12345), "12345");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234.56"), "-1,234.56");
        assert_eq!(add_thousands_separator("-123"), "-123");
    }
}
