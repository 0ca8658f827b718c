use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{
    AssetAllocationChangeset, AssetAllocationDB, PortfolioChangeset, PortfolioDB,
    PortfolioPerformanceDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{asset_allocations, clients, portfolio_performance, portfolios};
use crate::utils::decimal_text;
use wealthdesk_core::clients::ClientId;
use wealthdesk_core::portfolios::{
    AssetAllocation, AssetAllocationUpdate, Portfolio, PortfolioPerformance, PortfolioRepositoryTrait,
    PortfolioUpdate,
};
use wealthdesk_core::utils::time_utils::now_naive;
use wealthdesk_core::{Error, Result};

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads a portfolio together with the business id of its client.
fn load_portfolio(conn: &mut SqliteConnection, portfolio_id: i32) -> Result<Option<Portfolio>> {
    let row = portfolios::table
        .inner_join(clients::table)
        .filter(portfolios::id.eq(portfolio_id))
        .select((PortfolioDB::as_select(), clients::client_id))
        .first::<(PortfolioDB, String)>(conn)
        .optional()
        .map_err(StorageError::from)?;
    row.map(|(portfolio, client_id)| Ok(portfolio.into_domain(ClientId::parse(client_id)?)))
        .transpose()
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn get_by_client(&self, client_id: &ClientId) -> Result<Option<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        let row = portfolios::table
            .inner_join(clients::table)
            .filter(clients::client_id.eq(client_id.as_str()))
            .select(PortfolioDB::as_select())
            .first::<PortfolioDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(|portfolio| portfolio.into_domain(client_id.clone())))
    }

    fn get_by_id(&self, portfolio_id: i32) -> Result<Option<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        load_portfolio(&mut conn, portfolio_id)
    }

    async fn update(&self, portfolio_id: i32, update: PortfolioUpdate) -> Result<Portfolio> {
        let changes = PortfolioChangeset {
            total_value: update.total_value.map(decimal_text),
            ytd_return: update.ytd_return.map(decimal_text),
            volatility: update.volatility.map(decimal_text),
            last_updated: Some(now_naive()),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let updated = diesel::update(portfolios::table.find(portfolio_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("Portfolio {}", portfolio_id)));
                }
                load_portfolio(conn, portfolio_id)?
                    .ok_or_else(|| Error::NotFound(format!("Portfolio {}", portfolio_id)))
            })
            .await
    }

    fn list_allocations(&self, portfolio_id: i32) -> Result<Vec<AssetAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = asset_allocations::table
            .filter(asset_allocations::portfolio_id.eq(portfolio_id))
            .order(asset_allocations::id.asc())
            .select(AssetAllocationDB::as_select())
            .load::<AssetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(AssetAllocation::from).collect())
    }

    async fn update_allocation(
        &self,
        allocation_id: i32,
        update: AssetAllocationUpdate,
    ) -> Result<AssetAllocation> {
        let changes = AssetAllocationChangeset {
            asset_type: update.asset_type.map(|t| t.trim().to_string()),
            allocation: update.allocation.map(decimal_text),
            value: update.value.map(decimal_text),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetAllocation> {
                let row = diesel::update(asset_allocations::table.find(allocation_id))
                    .set(&changes)
                    .returning(AssetAllocationDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                row.map(AssetAllocation::from)
                    .ok_or_else(|| Error::NotFound(format!("Allocation {}", allocation_id)))
            })
            .await
    }

    fn list_performance(&self, portfolio_id: i32, limit: i64) -> Result<Vec<PortfolioPerformance>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_performance::table
            .filter(portfolio_performance::portfolio_id.eq(portfolio_id))
            .order((
                portfolio_performance::date.desc(),
                portfolio_performance::id.desc(),
            ))
            .limit(limit)
            .select(PortfolioPerformanceDB::as_select())
            .load::<PortfolioPerformanceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(PortfolioPerformance::from).collect())
    }
}
