use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{MarketInsightDB, NewMarketInsightDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::market_insights;
use wealthdesk_core::insights::{MarketInsight, MarketInsightRepositoryTrait, NewMarketInsight};
use wealthdesk_core::utils::time_utils::now_naive;
use wealthdesk_core::Result;

pub struct MarketInsightRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MarketInsightRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MarketInsightRepositoryTrait for MarketInsightRepository {
    fn list(&self, limit: i64) -> Result<Vec<MarketInsight>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = market_insights::table
            .order((market_insights::created_at.desc(), market_insights::id.desc()))
            .limit(limit)
            .select(MarketInsightDB::as_select())
            .load::<MarketInsightDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(MarketInsight::from).collect())
    }

    async fn create(&self, insight: NewMarketInsight) -> Result<MarketInsight> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MarketInsight> {
                let row = NewMarketInsightDB::from_domain(insight, now_naive());
                let created = diesel::insert_into(market_insights::table)
                    .values(&row)
                    .returning(MarketInsightDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(MarketInsight::from(created))
            })
            .await
    }
}
