use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::portfolios_model::{
    allocation_total, AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioPerformance,
    PortfolioUpdate,
};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::clients::ClientId;
use crate::constants::{DEFAULT_PERFORMANCE_LIMIT, MAX_LIST_LIMIT};
use crate::errors::{Error, Result};

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_client_portfolio(&self, client_id: &ClientId) -> Result<Option<Portfolio>> {
        self.repository.get_by_client(client_id)
    }

    fn get_allocations(&self, portfolio_id: i32) -> Result<Vec<AssetAllocation>> {
        self.repository.list_allocations(portfolio_id)
    }

    fn get_performance(
        &self,
        portfolio_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<PortfolioPerformance>> {
        let limit = limit
            .unwrap_or(DEFAULT_PERFORMANCE_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        self.repository.list_performance(portfolio_id, limit)
    }

    async fn update_portfolio(
        &self,
        portfolio_id: i32,
        update: PortfolioUpdate,
    ) -> Result<Portfolio> {
        update.validate()?;
        if self.repository.get_by_id(portfolio_id)?.is_none() {
            return Err(Error::NotFound(format!("Portfolio {}", portfolio_id)));
        }
        debug!("Refreshing portfolio {}", portfolio_id);
        self.repository.update(portfolio_id, update).await
    }

    async fn update_allocation(
        &self,
        allocation_id: i32,
        update: AssetAllocationUpdate,
    ) -> Result<AssetAllocation> {
        update.validate()?;
        let updated = self
            .repository
            .update_allocation(allocation_id, update)
            .await?;

        // Sums are not enforced, only logged.
        let total = allocation_total(&self.repository.list_allocations(updated.portfolio_id)?);
        if total != rust_decimal::Decimal::ONE_HUNDRED {
            warn!(
                "Allocations of portfolio {} now sum to {}%",
                updated.portfolio_id, total
            );
        }
        Ok(updated)
    }
}
