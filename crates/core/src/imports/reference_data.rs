//! Reference content and demo clients for a fresh database.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::synthetic::{monthly_trend, AllocationMix};
use crate::clients::{ClientId, ClientSeed, NewClient, NewPortfolioSeed};
use crate::errors::{Error, Result, ValidationError};
use crate::glossary::NewGlossaryTerm;
use crate::insights::{InsightPriority, NewMarketInsight};

pub fn market_insight_seed() -> Vec<NewMarketInsight> {
    let insight = |title: &str, content: &str, category: &str, priority| NewMarketInsight {
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        priority,
    };
    vec![
        insight(
            "Fed Rate Decision Impact on Bond Markets",
            "The latest Federal Reserve decision opens opportunities in intermediate-term \
             corporate bonds. Duration risk stays manageable for portfolios with a three \
             to seven year horizon.",
            "CIO Update",
            InsightPriority::High,
        ),
        insight(
            "Technology Sector Outlook: AI Revolution Continues",
            "AI adoption is accelerating across industries and lifts demand for \
             infrastructure and software. We favour selective exposure to large-cap \
             technology names with proven AI capabilities.",
            "Recommendation",
            InsightPriority::Medium,
        ),
        insight(
            "ESG Integration in Emerging Markets",
            "Sustainable investing keeps gaining ground in emerging markets. Issuers with \
             strong ESG profiles have shown better risk-adjusted returns and lower volatility.",
            "ESG",
            InsightPriority::Medium,
        ),
        insight(
            "Currency Hedging Strategies for Global Portfolios",
            "A strong dollar brings both opportunity and risk for international holdings. \
             Portfolios with significant foreign exposure should review dynamic hedging.",
            "CIO Update",
            InsightPriority::High,
        ),
    ]
}

pub fn glossary_seed() -> Vec<NewGlossaryTerm> {
    [
        (
            "AUM",
            "Assets Under Management: the total market value of the investments a firm \
             or individual manages on behalf of clients.",
            "General",
        ),
        (
            "YTD Return",
            "Year-to-Date Return: the percentage gain or loss of an investment since the \
             first trading day of the current year.",
            "Performance",
        ),
        (
            "Volatility",
            "A statistical measure of how widely returns are dispersed for a security or \
             index, used as a gauge of price risk.",
            "Risk",
        ),
        (
            "Free Asset Ratio",
            "The share of investable assets an investor could lose without affecting \
             current lifestyle or financial obligations.",
            "Risk",
        ),
        (
            "Asset Allocation",
            "Distributing a portfolio across asset classes such as equities, bonds and \
             cash to balance risk against expected return.",
            "Strategy",
        ),
        (
            "Sharpe Ratio",
            "Risk-adjusted return: the excess return of an investment divided by the \
             standard deviation of its returns.",
            "Performance",
        ),
        (
            "Rebalancing",
            "Buying and selling holdings to bring portfolio weights back to their target \
             allocation.",
            "Strategy",
        ),
    ]
    .into_iter()
    .map(|(term, definition, category)| NewGlossaryTerm {
        term: term.to_string(),
        definition: definition.to_string(),
        category: category.to_string(),
        language: "en".to_string(),
    })
    .collect()
}

struct DemoClient {
    client_id: &'static str,
    name: &'static str,
    risk_tolerance: &'static str,
    horizon: i32,
    experience: &'static str,
    free_asset_ratio: Decimal,
    objective: &'static str,
    total_value: Decimal,
    ytd_return: Decimal,
    volatility: Decimal,
}

const DEMO_CLIENTS: [DemoClient; 3] = [
    DemoClient {
        client_id: "WM-001",
        name: "John Anderson",
        risk_tolerance: "Moderate",
        horizon: 7,
        experience: "Experienced",
        free_asset_ratio: dec!(75.5),
        objective: "Growth",
        total_value: dec!(2500000),
        ytd_return: dec!(8.5),
        volatility: dec!(12.3),
    },
    DemoClient {
        client_id: "WM-002",
        name: "Sarah Chen",
        risk_tolerance: "Conservative",
        horizon: 3,
        experience: "Beginner",
        free_asset_ratio: dec!(85.0),
        objective: "Capital Preservation",
        total_value: dec!(1200000),
        ytd_return: dec!(4.2),
        volatility: dec!(6.8),
    },
    DemoClient {
        client_id: "WM-003",
        name: "Michael Rodriguez",
        risk_tolerance: "Aggressive",
        horizon: 15,
        experience: "Experienced",
        free_asset_ratio: dec!(65.0),
        objective: "Maximum Growth",
        total_value: dec!(5000000),
        ytd_return: dec!(15.7),
        volatility: dec!(18.2),
    },
];

/// Three sample clients, one per risk band, with full portfolios.
pub fn demo_client_seeds<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<ClientSeed>> {
    DEMO_CLIENTS
        .iter()
        .map(|demo| {
            Ok(ClientSeed {
                client: NewClient {
                    client_id: ClientId::parse(demo.client_id)?,
                    name: demo.name.to_string(),
                    risk_tolerance: demo.risk_tolerance.to_string(),
                    investment_horizon: demo.horizon,
                    investment_experience: demo.experience.to_string(),
                    free_asset_ratio: demo.free_asset_ratio,
                    investment_objective: demo.objective.to_string(),
                },
                portfolio: Some(NewPortfolioSeed {
                    total_value: demo.total_value,
                    ytd_return: demo.ytd_return,
                    volatility: demo.volatility,
                    allocations: AllocationMix::for_risk_tolerance(demo.risk_tolerance)
                        .allocations(demo.total_value)
                        .ok_or_else(|| {
                            Error::Validation(ValidationError::invalid(format!(
                                "Demo portfolio value of {} is out of range",
                                demo.client_id
                            )))
                        })?,
                    performance: monthly_trend(rng, demo.total_value),
                }),
            })
        })
        .collect()
}
