//! Client domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ClientId;
use crate::errors::{Error, Result, ValidationError};
use crate::constants::MAX_FREE_ASSET_RATIO;
use crate::portfolios::{check_portfolio_figures, AssetAllocation, Portfolio, PortfolioPerformance};

/// Domain model of a wealth-management client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_id: ClientId,
    pub name: String,
    pub risk_tolerance: String,
    /// Years
    pub investment_horizon: i32,
    pub investment_experience: String,
    /// Percent of assets that are unconstrained
    pub free_asset_ratio: Decimal,
    pub investment_objective: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_horizon() -> i32 {
    5
}

fn default_experience() -> String {
    "Moderate".to_string()
}

fn default_free_asset_ratio() -> Decimal {
    dec!(75)
}

fn default_objective() -> String {
    "Growth".to_string()
}

/// Input model for creating a new client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub client_id: ClientId,
    pub name: String,
    pub risk_tolerance: String,
    #[serde(default = "default_horizon")]
    pub investment_horizon: i32,
    #[serde(default = "default_experience")]
    pub investment_experience: String,
    #[serde(default = "default_free_asset_ratio")]
    pub free_asset_ratio: Decimal,
    #[serde(default = "default_objective")]
    pub investment_objective: String,
}

impl NewClient {
    /// Validates the new client data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::invalid(
                "Client name cannot be empty",
            )));
        }
        if self.risk_tolerance.trim().is_empty() {
            return Err(Error::Validation(ValidationError::invalid(
                "Risk tolerance cannot be empty",
            )));
        }
        if !(0..=100).contains(&self.investment_horizon) {
            return Err(Error::Validation(ValidationError::invalid(
                "Investment horizon must be between 0 and 100 years",
            )));
        }
        if self.free_asset_ratio.is_sign_negative() || self.free_asset_ratio > MAX_FREE_ASSET_RATIO
        {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "Free asset ratio must be between 0 and {}",
                MAX_FREE_ASSET_RATIO
            ))));
        }
        Ok(())
    }
}

/// One allocation line of a portfolio that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSeed {
    pub asset_type: String,
    pub allocation: Decimal,
    pub value: Decimal,
}

/// One performance observation of a portfolio that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeed {
    pub date: NaiveDate,
    pub value: Decimal,
    pub benchmark_value: Option<Decimal>,
}

/// Portfolio summary plus its child rows, created together with the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioSeed {
    pub total_value: Decimal,
    pub ytd_return: Decimal,
    pub volatility: Decimal,
    pub allocations: Vec<AllocationSeed>,
    pub performance: Vec<PerformanceSeed>,
}

impl NewPortfolioSeed {
    pub fn validate(&self) -> Result<()> {
        check_portfolio_figures(
            Some(self.total_value),
            Some(self.ytd_return),
            Some(self.volatility),
        )
    }
}

/// Everything an import row produces; written as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSeed {
    pub client: NewClient,
    pub portfolio: Option<NewPortfolioSeed>,
}

/// The rows created from a [`ClientSeed`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeededClient {
    pub client: Client,
    pub portfolio: Option<Portfolio>,
    pub allocations: Vec<AssetAllocation>,
    pub performance: Vec<PortfolioPerformance>,
}

/// Maps free-form risk labels onto Conservative / Moderate / Aggressive.
pub fn normalize_risk_tolerance(raw: &str) -> &'static str {
    let lowered = raw.trim().to_lowercase();
    if ["conservative", "low", "cautious"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        "Conservative"
    } else if ["aggressive", "high", "dynamic"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        "Aggressive"
    } else {
        "Moderate"
    }
}

/// Maps free-form experience labels onto Beginner / Moderate / Experienced.
pub fn normalize_experience(raw: &str) -> &'static str {
    let lowered = raw.trim().to_lowercase();
    if ["beginner", "novice", "limited"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        "Beginner"
    } else if ["experienced", "expert", "advanced"]
        .iter()
        .any(|k| lowered.contains(k))
    {
        "Experienced"
    } else {
        "Moderate"
    }
}
