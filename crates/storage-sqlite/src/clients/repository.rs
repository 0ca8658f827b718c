use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{ClientDB, NewClientDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::portfolios::{
    AssetAllocationDB, NewAssetAllocationDB, NewPortfolioDB, NewPortfolioPerformanceDB,
    PortfolioDB, PortfolioPerformanceDB,
};
use crate::schema::{
    asset_allocations, chat_messages, clients, portfolio_performance, portfolios,
};
use crate::utils::decimal_text;
use wealthdesk_core::clients::{
    Client, ClientId, ClientRepositoryTrait, ClientSeed, NewClient, SeededClient,
};
use wealthdesk_core::portfolios::{AssetAllocation, PortfolioPerformance};
use wealthdesk_core::utils::time_utils::now_naive;
use wealthdesk_core::Result;

pub struct ClientRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ClientRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn insert_client(conn: &mut SqliteConnection, new_client: NewClient) -> Result<ClientDB> {
    let row = NewClientDB::from_domain(new_client, now_naive());
    Ok(diesel::insert_into(clients::table)
        .values(&row)
        .returning(ClientDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?)
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    fn get_by_client_id(&self, client_id: &ClientId) -> Result<Option<Client>> {
        let mut conn = get_connection(&self.pool)?;
        clients::table
            .filter(clients::client_id.eq(client_id.as_str()))
            .select(ClientDB::as_select())
            .first::<ClientDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Client::try_from)
            .transpose()
    }

    fn list(&self) -> Result<Vec<Client>> {
        let mut conn = get_connection(&self.pool)?;
        clients::table
            .order((clients::name.asc(), clients::id.asc()))
            .select(ClientDB::as_select())
            .load::<ClientDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Client::try_from)
            .collect()
    }

    fn exists(&self, client_id: &ClientId) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = clients::table
            .filter(clients::client_id.eq(client_id.as_str()))
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(count > 0)
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Client> {
                Client::try_from(insert_client(conn, new_client)?)
            })
            .await
    }

    async fn create_seeded(&self, seed: ClientSeed) -> Result<SeededClient> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SeededClient> {
                let client_db = insert_client(conn, seed.client)?;
                let client_row_id = client_db.id;
                let client = Client::try_from(client_db)?;

                let Some(portfolio_seed) = seed.portfolio else {
                    return Ok(SeededClient {
                        client,
                        portfolio: None,
                        allocations: Vec::new(),
                        performance: Vec::new(),
                    });
                };

                let new_portfolio = NewPortfolioDB {
                    client_id: client_row_id,
                    total_value: decimal_text(portfolio_seed.total_value),
                    ytd_return: decimal_text(portfolio_seed.ytd_return),
                    volatility: decimal_text(portfolio_seed.volatility),
                    last_updated: now_naive(),
                };
                let portfolio_db = diesel::insert_into(portfolios::table)
                    .values(&new_portfolio)
                    .returning(PortfolioDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let portfolio_id = portfolio_db.id;

                let mut allocations = Vec::with_capacity(portfolio_seed.allocations.len());
                for seed in portfolio_seed.allocations {
                    let row = NewAssetAllocationDB::from_seed(portfolio_id, seed);
                    let created = diesel::insert_into(asset_allocations::table)
                        .values(&row)
                        .returning(AssetAllocationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    allocations.push(AssetAllocation::from(created));
                }

                let mut performance = Vec::with_capacity(portfolio_seed.performance.len());
                for seed in portfolio_seed.performance {
                    let row = NewPortfolioPerformanceDB::from_seed(portfolio_id, seed);
                    let created = diesel::insert_into(portfolio_performance::table)
                        .values(&row)
                        .returning(PortfolioPerformanceDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    performance.push(PortfolioPerformance::from(created));
                }

                Ok(SeededClient {
                    portfolio: Some(portfolio_db.into_domain(client.client_id.clone())),
                    client,
                    allocations,
                    performance,
                })
            })
            .await
    }

    async fn delete_all(&self) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(portfolio_performance::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(asset_allocations::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(portfolios::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(chat_messages::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(diesel::delete(clients::table)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
