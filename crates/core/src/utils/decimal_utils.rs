use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Parses a spreadsheet-style number.
///
/// Accepts thousands separators, a trailing `%`, a leading currency sign and
/// scientific notation (through an f64 fallback). Returns `None` for blanks
/// and anything that is not a number.
pub fn parse_flexible_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| *c != ',' && *c != '\'' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .or_else(|| f64::from_str(&cleaned).ok().and_then(Decimal::from_f64))
}

/// Rounds to the display precision, half away from zero.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

pub fn from_f64_or_zero(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

pub fn to_f64_or_zero(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_decorated_numbers() {
        assert_eq!(parse_flexible_decimal("42"), Some(dec!(42)));
        assert_eq!(parse_flexible_decimal(" 1,250,000.50 "), Some(dec!(1250000.50)));
        assert_eq!(parse_flexible_decimal("75%"), Some(dec!(75)));
        assert_eq!(parse_flexible_decimal("$9.99"), Some(dec!(9.99)));
        assert_eq!(parse_flexible_decimal("-3.2"), Some(dec!(-3.2)));
    }

    #[test]
    fn parses_scientific_notation() {
        assert_eq!(parse_flexible_decimal("1e3"), Some(dec!(1000)));
    }

    #[test]
    fn rejects_blank_and_text() {
        assert_eq!(parse_flexible_decimal(""), None);
        assert_eq!(parse_flexible_decimal("   "), None);
        assert_eq!(parse_flexible_decimal("n/a"), None);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_display(dec!(2.345)), dec!(2.35));
        assert_eq!(round_display(dec!(-2.345)), dec!(-2.35));
    }
}
