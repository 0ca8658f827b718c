//! Masked persona export to client seeds.

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::column_mapping::MappedRow;
use super::imports_errors::ImportError;
use super::synthetic::{random_walk, AllocationMix};
use crate::clients::{ClientId, ClientSeed, NewClient, NewPortfolioSeed};
use crate::constants::MAX_FREE_ASSET_RATIO;
use crate::portfolios::check_portfolio_figures;
use crate::utils::decimal_utils::{from_f64_or_zero, round_display};

const VALUE_PER_POSITION: Decimal = dec!(50000);

/// Label for a persona risk code.
pub fn risk_code_label(code: &str) -> &'static str {
    match code.trim().to_ascii_uppercase().as_str() {
        "A" => "Conservative",
        "B" => "Moderate Conservative",
        "C" => "Moderate",
        "D" => "Balanced",
        "E" => "Dynamic",
        "F" | "G" => "Aggressive",
        _ => "Balanced",
    }
}

fn currency_multiplier(currency: &str) -> Decimal {
    match currency.trim().to_ascii_uppercase().as_str() {
        "EUR" => dec!(0.9),
        "SGD" => dec!(0.7),
        _ => Decimal::ONE,
    }
}

/// Volatility is exported either as a fraction (0.12) or in percent (12).
fn as_percent(volatility: Decimal) -> Decimal {
    if volatility.abs() <= Decimal::ONE {
        volatility * dec!(100)
    } else {
        volatility
    }
}

/// Builds a client and a synthetic portfolio from one persona row.
///
/// The portfolio size follows the position count, currency and risk code;
/// the free asset ratio is the relative gap between the portfolio's and the
/// strategic allocation's volatility.
pub fn persona_seed_from_row<R: Rng + ?Sized>(
    row: &MappedRow<'_>,
    rng: &mut R,
) -> Result<ClientSeed, ImportError> {
    let line = row.line();
    let persona = row.required_text("persona")?;
    let masked_id = row.required_text("masked_client_id")?;
    let client_id =
        ClientId::parse(masked_id).map_err(|e| ImportError::row(line, e.to_string()))?;
    let risk_code = row.required_text("risk_tolerance")?;
    let currency = row.text("portfolio_ccy").unwrap_or("USD");

    let volatility = as_percent(row.required_decimal("portfolio_volatility")?);
    let saa_volatility = as_percent(row.required_decimal("saa_portfolio_volatility")?);
    if saa_volatility <= Decimal::ZERO {
        return Err(ImportError::row(line, "SAA volatility must be positive"));
    }
    let positions = row
        .integer("number_of_positions")?
        .filter(|n| *n >= 0)
        .ok_or_else(|| ImportError::row(line, "number of positions must be a whole number"))?;

    let reactive = persona.to_lowercase().contains("reactive");
    let aggressive = risk_code.trim().eq_ignore_ascii_case("F");
    let suffix: String = {
        let chars: Vec<char> = client_id.as_str().chars().collect();
        chars[chars.len().saturating_sub(4)..].iter().collect()
    };

    check_portfolio_figures(None, None, Some(volatility))
        .and_then(|_| check_portfolio_figures(None, None, Some(saa_volatility)))
        .map_err(|e| ImportError::row(line, e.to_string()))?;

    // Capped at 100: the ratio is a share of total assets.
    let free_asset_ratio = (volatility - saa_volatility)
        .abs()
        .checked_div(saa_volatility)
        .and_then(|gap| gap.checked_mul(dec!(100)))
        .ok_or_else(|| ImportError::row(line, "volatility gap is out of range"))?
        .min(MAX_FREE_ASSET_RATIO)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    let risk_multiplier = if aggressive { dec!(1.5) } else { Decimal::ONE };
    let total_value = (Decimal::from(positions)
        * VALUE_PER_POSITION
        * risk_multiplier
        * currency_multiplier(currency))
    .round();
    check_portfolio_figures(Some(total_value), None, None)
        .map_err(|e| ImportError::row(line, e.to_string()))?;

    let volatility_fraction = (volatility / dec!(100)).to_f64().unwrap_or(0.0);
    let ytd_fraction = rng.gen_range(-0.1..0.1) + volatility_fraction * rng.gen_range(-1.0..1.0);
    let ytd_return = round_display(from_f64_or_zero(ytd_fraction * 100.0));

    let objective = match (aggressive, reactive) {
        (true, true) => "Growth with volatility concerns",
        (true, false) => "Long-term growth",
        (false, _) => "Balanced growth and income",
    };

    let client = NewClient {
        name: format!(
            "{} Client {}",
            if reactive { "Reactive" } else { "Established" },
            suffix
        ),
        client_id,
        risk_tolerance: risk_code_label(risk_code).to_string(),
        investment_horizon: if reactive { 3 } else { 7 },
        investment_experience: if reactive { "Intermediate" } else { "Advanced" }.to_string(),
        free_asset_ratio,
        investment_objective: objective.to_string(),
    };

    let mix = AllocationMix::for_risk_code(risk_code);
    let portfolio = NewPortfolioSeed {
        total_value,
        ytd_return,
        volatility: round_display(volatility),
        allocations: mix
            .allocations(total_value)
            .ok_or_else(|| ImportError::row(line, "portfolio value is too large"))?,
        performance: random_walk(rng, total_value, volatility_fraction),
    };

    Ok(ClientSeed {
        client,
        portfolio: Some(portfolio),
    })
}
