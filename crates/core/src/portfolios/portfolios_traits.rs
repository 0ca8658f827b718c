use async_trait::async_trait;

use super::portfolios_model::{
    AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioPerformance, PortfolioUpdate,
};
use crate::clients::ClientId;
use crate::errors::Result;

/// Trait for portfolio repository operations
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_by_client(&self, client_id: &ClientId) -> Result<Option<Portfolio>>;
    fn get_by_id(&self, portfolio_id: i32) -> Result<Option<Portfolio>>;
    /// Applies the update and stamps `last_updated` with the current time.
    async fn update(&self, portfolio_id: i32, update: PortfolioUpdate) -> Result<Portfolio>;
    fn list_allocations(&self, portfolio_id: i32) -> Result<Vec<AssetAllocation>>;
    async fn update_allocation(
        &self,
        allocation_id: i32,
        update: AssetAllocationUpdate,
    ) -> Result<AssetAllocation>;
    /// Newest first.
    fn list_performance(&self, portfolio_id: i32, limit: i64) -> Result<Vec<PortfolioPerformance>>;
}

/// Trait for portfolio service operations
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_client_portfolio(&self, client_id: &ClientId) -> Result<Option<Portfolio>>;
    fn get_allocations(&self, portfolio_id: i32) -> Result<Vec<AssetAllocation>>;
    fn get_performance(
        &self,
        portfolio_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<PortfolioPerformance>>;
    async fn update_portfolio(&self, portfolio_id: i32, update: PortfolioUpdate)
        -> Result<Portfolio>;
    async fn update_allocation(
        &self,
        allocation_id: i32,
        update: AssetAllocationUpdate,
    ) -> Result<AssetAllocation>;
}
