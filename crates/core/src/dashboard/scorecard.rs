//! Portfolio health scorecard.
//!
//! Five metrics are scored on a 0-100 scale and graded independently; the
//! overall grade comes from their average. Milestones are simple threshold
//! checks on portfolio value, YTD return and the number of asset classes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::clients::{Client, ClientId};
use crate::portfolios::{AssetAllocation, Portfolio};
use crate::utils::decimal_utils::round_display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthMetricKind {
    PortfolioGrowth,
    RiskManagement,
    Diversification,
    Liquidity,
    Balance,
}

impl HealthMetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            HealthMetricKind::PortfolioGrowth => "Portfolio Growth",
            HealthMetricKind::RiskManagement => "Risk Management",
            HealthMetricKind::Diversification => "Diversification",
            HealthMetricKind::Liquidity => "Liquidity",
            HealthMetricKind::Balance => "Balance",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    pub kind: HealthMetricKind,
    pub label: String,
    pub score: Decimal,
    pub status: HealthStatus,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub threshold: Decimal,
    pub achieved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub client_id: ClientId,
    pub overall_score: Decimal,
    pub overall_status: HealthStatus,
    pub metrics: Vec<HealthMetric>,
    pub milestones: Vec<Milestone>,
    pub milestones_achieved: usize,
}

fn clamp_score(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

fn metric(
    kind: HealthMetricKind,
    score: Decimal,
    status: HealthStatus,
    description: String,
) -> HealthMetric {
    HealthMetric {
        kind,
        label: kind.label().to_string(),
        score: round_display(clamp_score(score)),
        status,
        description,
    }
}

fn growth_metric(ytd: Decimal) -> HealthMetric {
    let status = if ytd > dec!(5) {
        HealthStatus::Excellent
    } else if ytd > Decimal::ZERO {
        HealthStatus::Good
    } else if ytd > dec!(-5) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    };
    metric(
        HealthMetricKind::PortfolioGrowth,
        // saturates outside -10..=10
        (ytd.clamp(dec!(-10), dec!(10)) + dec!(10)) * dec!(5),
        status,
        format!("YTD Return: {}%", round_display(ytd)),
    )
}

fn risk_metric(volatility: Decimal) -> HealthMetric {
    let status = if volatility < dec!(5) {
        HealthStatus::Excellent
    } else if volatility < dec!(10) {
        HealthStatus::Good
    } else if volatility < dec!(15) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    };
    metric(
        HealthMetricKind::RiskManagement,
        (dec!(20) - volatility.clamp(Decimal::ZERO, dec!(20))) * dec!(5),
        status,
        format!("Volatility: {}%", round_display(volatility)),
    )
}

fn diversification_metric(asset_count: usize) -> HealthMetric {
    let status = match asset_count {
        n if n >= 4 => HealthStatus::Excellent,
        3 => HealthStatus::Good,
        2 => HealthStatus::Warning,
        _ => HealthStatus::Critical,
    };
    metric(
        HealthMetricKind::Diversification,
        Decimal::from(asset_count.min(4)) * dec!(25),
        status,
        format!("{} asset classes", asset_count),
    )
}

fn liquidity_metric(free_asset_ratio: Decimal) -> HealthMetric {
    let status = if free_asset_ratio > dec!(8) {
        HealthStatus::Excellent
    } else if free_asset_ratio > dec!(5) {
        HealthStatus::Good
    } else if free_asset_ratio > dec!(3) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    };
    metric(
        HealthMetricKind::Liquidity,
        free_asset_ratio.clamp(Decimal::ZERO, dec!(10)) * dec!(10),
        status,
        format!("Free Asset Ratio: {}%", round_display(free_asset_ratio)),
    )
}

fn balance_metric(max_allocation: Decimal) -> HealthMetric {
    let status = if max_allocation < dec!(50) {
        HealthStatus::Excellent
    } else if max_allocation < dec!(60) {
        HealthStatus::Good
    } else if max_allocation < dec!(70) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    };
    metric(
        HealthMetricKind::Balance,
        Decimal::ONE_HUNDRED - (max_allocation.clamp(dec!(40), dec!(140)) - dec!(40)),
        status,
        format!("Max Allocation: {}%", round_display(max_allocation)),
    )
}

fn overall_status(average: Decimal) -> HealthStatus {
    if average >= dec!(80) {
        HealthStatus::Excellent
    } else if average >= dec!(60) {
        HealthStatus::Good
    } else if average >= dec!(40) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

fn milestone(id: &str, title: &str, threshold: Decimal, achieved: bool) -> Milestone {
    Milestone {
        id: id.to_string(),
        title: title.to_string(),
        threshold,
        achieved,
    }
}

fn milestones(portfolio: &Portfolio, asset_count: usize) -> Vec<Milestone> {
    let value = portfolio.total_value;
    let ytd = portfolio.ytd_return;
    vec![
        milestone("first_investment", "First Investment", dec!(1000), value >= dec!(1000)),
        milestone("growing_portfolio", "Growing Portfolio", dec!(100000), value >= dec!(100000)),
        milestone("six_figures", "Six Figures", dec!(100000), value >= dec!(100000)),
        milestone("half_million", "Half Million", dec!(500000), value >= dec!(500000)),
        milestone("millionaire", "Millionaire Status", dec!(1000000), value >= dec!(1000000)),
        milestone("positive_return", "Positive Returns", Decimal::ZERO, ytd > Decimal::ZERO),
        milestone("strong_performer", "Strong Performer", dec!(5), ytd > dec!(5)),
        milestone("diversified", "Well Diversified", dec!(4), asset_count >= 4),
    ]
}

/// Scores a client's portfolio.
pub fn build_scorecard(
    client: &Client,
    portfolio: &Portfolio,
    allocations: &[AssetAllocation],
) -> Scorecard {
    let max_allocation = allocations
        .iter()
        .map(|a| a.allocation)
        .max()
        .unwrap_or(Decimal::ZERO);

    let metrics = vec![
        growth_metric(portfolio.ytd_return),
        risk_metric(portfolio.volatility),
        diversification_metric(allocations.len()),
        liquidity_metric(client.free_asset_ratio),
        balance_metric(max_allocation),
    ];
    let total: Decimal = metrics.iter().map(|m| m.score).sum();
    let average = total / Decimal::from(metrics.len());

    let milestones = milestones(portfolio, allocations.len());
    let milestones_achieved = milestones.iter().filter(|m| m.achieved).count();

    Scorecard {
        client_id: client.client_id.clone(),
        overall_score: round_display(average),
        overall_status: overall_status(average),
        metrics,
        milestones,
        milestones_achieved,
    }
}
