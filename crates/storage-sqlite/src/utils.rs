//! Decimal columns are stored as TEXT.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Reads a decimal column. Values written by other tools as floats are
/// accepted; anything unreadable is logged and read as zero.
pub fn parse_decimal_text(value: &str, column: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(decimal_err) => match f64::from_str(value).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as a decimal ({}); reading it as zero",
                    column,
                    value,
                    decimal_err
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_optional_decimal_text(value: Option<&str>, column: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal_text(v, column))
}

pub fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn optional_decimal_text(value: Option<Decimal>) -> Option<String> {
    value.map(decimal_text)
}
