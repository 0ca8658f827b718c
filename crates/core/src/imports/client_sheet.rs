use rand::Rng;
use rust_decimal::Decimal;

use super::column_mapping::MappedRow;
use super::imports_errors::ImportError;
use super::synthetic::{monthly_trend, AllocationMix};
use crate::clients::{
    normalize_experience, normalize_risk_tolerance, ClientId, ClientSeed, NewClient,
    NewPortfolioSeed,
};
use crate::portfolios::check_portfolio_figures;
use crate::utils::decimal_utils::{from_f64_or_zero, round_display};

/// Maps one client sheet row. Portfolio figures missing from the sheet are
/// generated; allocations always follow the normalized risk tolerance.
pub fn client_seed_from_row<R: Rng + ?Sized>(
    row: &MappedRow<'_>,
    rng: &mut R,
) -> Result<ClientSeed, ImportError> {
    let line = row.line();
    let client_id = ClientId::parse(row.required_text("client_id")?)
        .map_err(|e| ImportError::row(line, e.to_string()))?;
    let risk_tolerance = normalize_risk_tolerance(row.required_text("risk_tolerance")?);

    let investment_horizon = row
        .integer("investment_horizon")?
        .and_then(|years| i32::try_from(years).ok())
        .unwrap_or(5);

    let client = NewClient {
        client_id,
        name: row.required_text("name")?.to_string(),
        risk_tolerance: risk_tolerance.to_string(),
        investment_horizon,
        investment_experience: normalize_experience(
            row.text("investment_experience").unwrap_or_default(),
        )
        .to_string(),
        free_asset_ratio: row
            .decimal("free_asset_ratio")?
            .unwrap_or(Decimal::from(75)),
        investment_objective: row
            .text("investment_objective")
            .unwrap_or("Growth")
            .to_string(),
    };
    client
        .validate()
        .map_err(|e| ImportError::row(line, e.to_string()))?;

    let total_value = match row.decimal("portfolio_value")? {
        Some(value) => value,
        None => round_display(from_f64_or_zero(rng.gen_range(1_000_000.0..3_000_000.0))),
    };
    let ytd_return = match row.decimal("ytd_return")? {
        Some(value) => value,
        None => round_display(from_f64_or_zero(rng.gen_range(2.0..17.0))),
    };
    let volatility = match row.decimal("volatility")? {
        Some(value) => value,
        None => round_display(from_f64_or_zero(rng.gen_range(8.0..18.0))),
    };
    check_portfolio_figures(Some(total_value), Some(ytd_return), Some(volatility))
        .map_err(|e| ImportError::row(line, e.to_string()))?;
    let allocations = AllocationMix::for_risk_tolerance(risk_tolerance)
        .allocations(total_value)
        .ok_or_else(|| ImportError::row(line, "portfolio value is too large"))?;

    let portfolio = NewPortfolioSeed {
        total_value,
        ytd_return,
        volatility,
        allocations,
        performance: monthly_trend(rng, total_value),
    };

    Ok(ClientSeed {
        client,
        portfolio: Some(portfolio),
    })
}
