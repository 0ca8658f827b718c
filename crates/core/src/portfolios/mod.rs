//! Portfolios module - portfolio summaries, allocations and performance history.

mod portfolios_model;
mod portfolios_service;
mod portfolios_traits;

#[cfg(test)]
mod portfolios_model_tests;

pub use portfolios_model::{
    allocation_total, check_portfolio_figures, AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioPerformance,
    PortfolioUpdate,
};
pub use portfolios_service::PortfolioService;
pub use portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
