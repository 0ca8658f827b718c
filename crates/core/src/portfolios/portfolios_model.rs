//! Portfolio domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clients::ClientId;
use crate::constants::{MAX_PORTFOLIO_VALUE, MAX_RETURN_PERCENT, MAX_VOLATILITY_PERCENT};
use crate::errors::{Error, Result, ValidationError};

/// Aggregate holdings summary of one client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: i32,
    pub client_id: ClientId,
    pub total_value: Decimal,
    /// Year-to-date return in percent
    pub ytd_return: Decimal,
    /// Annualized volatility in percent
    pub volatility: Decimal,
    pub last_updated: NaiveDateTime,
}

/// Value refresh for an existing portfolio. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub total_value: Option<Decimal>,
    pub ytd_return: Option<Decimal>,
    pub volatility: Option<Decimal>,
}

impl PortfolioUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.total_value.is_none() && self.ytd_return.is_none() && self.volatility.is_none() {
            return Err(Error::Validation(ValidationError::invalid(
                "Portfolio update must change at least one field",
            )));
        }
        check_portfolio_figures(self.total_value, self.ytd_return, self.volatility)
    }
}

fn invalid(msg: String) -> Error {
    Error::Validation(ValidationError::invalid(msg))
}

/// Range checks shared by portfolio updates and imported portfolios. Within
/// these bounds allocation values and scorecard metrics stay in `Decimal` range.
pub fn check_portfolio_figures(
    total_value: Option<Decimal>,
    ytd_return: Option<Decimal>,
    volatility: Option<Decimal>,
) -> Result<()> {
    if let Some(value) = total_value {
        if value.is_sign_negative() || value > MAX_PORTFOLIO_VALUE {
            return Err(invalid(format!(
                "Total value must be between 0 and {}",
                MAX_PORTFOLIO_VALUE
            )));
        }
    }
    if let Some(ytd) = ytd_return {
        if ytd.abs() > MAX_RETURN_PERCENT {
            return Err(invalid(format!(
                "YTD return must be within +/-{}%",
                MAX_RETURN_PERCENT
            )));
        }
    }
    if let Some(vol) = volatility {
        if vol.is_sign_negative() || vol > MAX_VOLATILITY_PERCENT {
            return Err(invalid(format!(
                "Volatility must be between 0 and {}%",
                MAX_VOLATILITY_PERCENT
            )));
        }
    }
    Ok(())
}

/// Share of a portfolio held in one asset class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub id: i32,
    pub portfolio_id: i32,
    pub asset_type: String,
    /// Percent of the portfolio. Rows of one portfolio usually, but not
    /// necessarily, add up to 100.
    pub allocation: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocationUpdate {
    pub asset_type: Option<String>,
    pub allocation: Option<Decimal>,
    pub value: Option<Decimal>,
}

impl AssetAllocationUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.asset_type.is_none() && self.allocation.is_none() && self.value.is_none() {
            return Err(Error::Validation(ValidationError::invalid(
                "Allocation update must change at least one field",
            )));
        }
        if self
            .asset_type
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            return Err(Error::Validation(ValidationError::invalid(
                "Asset type cannot be empty",
            )));
        }
        if let Some(pct) = self.allocation {
            if pct.is_sign_negative() || pct > Decimal::ONE_HUNDRED {
                return Err(Error::Validation(ValidationError::invalid(
                    "Allocation must be between 0 and 100",
                )));
            }
        }
        if self
            .value
            .is_some_and(|v| v.is_sign_negative() || v > MAX_PORTFOLIO_VALUE)
        {
            return Err(invalid(format!(
                "Allocation value must be between 0 and {}",
                MAX_PORTFOLIO_VALUE
            )));
        }
        Ok(())
    }
}

/// One observation of portfolio value against its benchmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    pub id: i32,
    pub portfolio_id: i32,
    pub date: NaiveDate,
    pub value: Decimal,
    pub benchmark_value: Option<Decimal>,
}

/// Sum of the allocation percentages.
pub fn allocation_total(allocations: &[AssetAllocation]) -> Decimal {
    allocations.iter().map(|a| a.allocation).sum()
}
