//! Plain-text client summary embedded in every advisor prompt.

use wealthdesk_core::clients::Client;
use wealthdesk_core::dashboard::AdvisoryContext;
use wealthdesk_core::portfolios::{AssetAllocation, Portfolio};

/// Renders the client profile, then the portfolio summary and allocation
/// lines when present.
pub fn build_client_context(
    client: &Client,
    portfolio: Option<&Portfolio>,
    allocations: &[AssetAllocation],
) -> String {
    let mut context = format!(
        "Client ID: {}\n\
         Risk Tolerance: {}\n\
         Investment Horizon: {} years\n\
         Investment Experience: {}\n\
         Free Asset Ratio: {}%\n\
         Investment Objective: {}\n",
        client.client_id,
        client.risk_tolerance,
        client.investment_horizon,
        client.investment_experience,
        client.free_asset_ratio,
        client.investment_objective
    );

    if let Some(portfolio) = portfolio {
        context.push_str(&format!(
            "\nPortfolio Value: ${}\nYTD Return: {}%\nPortfolio Volatility: {}%\n",
            portfolio.total_value, portfolio.ytd_return, portfolio.volatility
        ));
    }

    if !allocations.is_empty() {
        context.push_str("\nAsset Allocation:\n");
        for allocation in allocations {
            context.push_str(&format!(
                "- {}: {}% (${})\n",
                allocation.asset_type, allocation.allocation, allocation.value
            ));
        }
    }

    context
}

pub fn context_for(advisory: &AdvisoryContext) -> String {
    build_client_context(
        &advisory.client,
        advisory.portfolio.as_ref(),
        &advisory.allocations,
    )
}
