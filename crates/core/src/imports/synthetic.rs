//! Generated figures for imports that carry no portfolio detail.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::clients::{AllocationSeed, PerformanceSeed};
use crate::utils::decimal_utils::{from_f64_or_zero, round_display, to_f64_or_zero};
use crate::utils::time_utils::month_starts;

/// First month of every generated performance history.
pub const PERFORMANCE_START: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid performance start"),
};

/// Months of generated performance history.
pub const PERFORMANCE_MONTHS: usize = 12;

/// Target asset mix for a risk band. Percentages in each mix sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMix {
    Conservative,
    Balanced,
    Aggressive,
}

impl AllocationMix {
    pub const ALL: [AllocationMix; 3] = [
        AllocationMix::Conservative,
        AllocationMix::Balanced,
        AllocationMix::Aggressive,
    ];

    pub fn weights(&self) -> Vec<(&'static str, Decimal)> {
        match self {
            AllocationMix::Conservative => vec![
                ("Fixed Income", dec!(70)),
                ("Equities", dec!(20)),
                ("Cash", dec!(10)),
            ],
            AllocationMix::Balanced => vec![
                ("Equities", dec!(60)),
                ("Fixed Income", dec!(30)),
                ("Alternatives", dec!(8)),
                ("Cash", dec!(2)),
            ],
            AllocationMix::Aggressive => vec![
                ("Equities", dec!(80)),
                ("Alternatives", dec!(15)),
                ("Fixed Income", dec!(3)),
                ("Cash", dec!(2)),
            ],
        }
    }

    /// Mix for a normalized risk label (Conservative / Moderate / Aggressive).
    pub fn for_risk_tolerance(risk_tolerance: &str) -> Self {
        match risk_tolerance {
            "Conservative" => AllocationMix::Conservative,
            "Aggressive" => AllocationMix::Aggressive,
            _ => AllocationMix::Balanced,
        }
    }

    /// Mix for a persona risk code: A-B conservative, E-G aggressive.
    pub fn for_risk_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" | "B" => AllocationMix::Conservative,
            "E" | "F" | "G" => AllocationMix::Aggressive,
            _ => AllocationMix::Balanced,
        }
    }

    /// Allocation seeds for a portfolio of `total_value`, or `None` when an
    /// allocation value does not fit in a `Decimal`.
    pub fn allocations(&self, total_value: Decimal) -> Option<Vec<AllocationSeed>> {
        self.weights()
            .into_iter()
            .map(|(asset_type, allocation)| {
                let value = total_value.checked_mul(allocation)? / dec!(100);
                Some(AllocationSeed {
                    asset_type: asset_type.to_string(),
                    allocation,
                    value: round_display(value),
                })
            })
            .collect()
    }
}

/// History that compounds a fixed annual rate plus monthly noise.
///
/// The portfolio grows at 8% a year with up to 5% noise per month, the
/// benchmark at 6% with up to 2.5%.
pub fn monthly_trend<R: Rng + ?Sized>(rng: &mut R, base_value: Decimal) -> Vec<PerformanceSeed> {
    let base = to_f64_or_zero(base_value);
    month_starts(PERFORMANCE_START, PERFORMANCE_MONTHS)
        .into_iter()
        .enumerate()
        .map(|(month, date)| {
            let growth = (1.0 + 0.08 / 12.0f64).powi(month as i32);
            let benchmark_growth = (1.0 + 0.06 / 12.0f64).powi(month as i32);
            let value = base * growth * (1.0 + rng.gen_range(-0.05..0.05));
            let benchmark = base * benchmark_growth * (1.0 + rng.gen_range(-0.025..0.025));
            PerformanceSeed {
                date,
                value: round_display(from_f64_or_zero(value)),
                benchmark_value: Some(round_display(from_f64_or_zero(benchmark))),
            }
        })
        .collect()
}

/// History as a random walk scaled by volatility.
///
/// `volatility_fraction` is annual volatility as a fraction (0.12 for 12%).
/// The benchmark walks independently within 1% a month.
pub fn random_walk<R: Rng + ?Sized>(
    rng: &mut R,
    base_value: Decimal,
    volatility_fraction: f64,
) -> Vec<PerformanceSeed> {
    let mut value = to_f64_or_zero(base_value);
    let mut benchmark = value;
    month_starts(PERFORMANCE_START, PERFORMANCE_MONTHS)
        .into_iter()
        .map(|date| {
            value *= 1.0 + rng.gen_range(-0.5..0.5) * volatility_fraction * 0.1;
            benchmark *= 1.0 + rng.gen_range(-0.01..0.01);
            PerformanceSeed {
                date,
                value: round_display(from_f64_or_zero(value)),
                benchmark_value: Some(round_display(from_f64_or_zero(benchmark))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn risk_codes_pick_a_band() {
        assert_eq!(AllocationMix::for_risk_code("a"), AllocationMix::Conservative);
        assert_eq!(AllocationMix::for_risk_code("D"), AllocationMix::Balanced);
        assert_eq!(AllocationMix::for_risk_code("F"), AllocationMix::Aggressive);
        assert_eq!(AllocationMix::for_risk_code("?"), AllocationMix::Balanced);
    }

    #[test]
    fn allocation_values_follow_the_weights() {
        let seeds = AllocationMix::Conservative.allocations(dec!(1000000)).unwrap();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].asset_type, "Fixed Income");
        assert_eq!(seeds[0].value, dec!(700000));
        assert_eq!(seeds[2].value, dec!(100000));
    }

    #[test]
    fn allocation_overflow_is_none() {
        assert!(AllocationMix::Aggressive.allocations(Decimal::MAX).is_none());
    }

    #[test]
    fn histories_cover_twelve_month_starts() {
        let mut rng = StdRng::seed_from_u64(7);
        let trend = monthly_trend(&mut rng, dec!(100000));
        let walk = random_walk(&mut rng, dec!(100000), 0.12);

        for series in [&trend, &walk] {
            assert_eq!(series.len(), 12);
            assert_eq!(series[0].date, PERFORMANCE_START);
            assert_eq!(series[11].date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
            assert!(series.iter().all(|p| p.value > Decimal::ZERO));
            assert!(series.iter().all(|p| p.benchmark_value.is_some()));
        }
    }

    #[test]
    fn trend_stays_near_compound_growth() {
        let mut rng = StdRng::seed_from_u64(42);
        let trend = monthly_trend(&mut rng, dec!(100000));
        let last = to_f64_or_zero(trend[11].value);
        let expected = 100000.0 * (1.0 + 0.08 / 12.0f64).powi(11);
        assert!((last - expected).abs() <= expected * 0.05 + 0.01);
    }
}
