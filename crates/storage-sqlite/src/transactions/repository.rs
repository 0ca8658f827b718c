use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use wealthdesk_core::clients::ClientId;
use wealthdesk_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use wealthdesk_core::utils::time_utils::now_naive;
use wealthdesk_core::Result;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_by_client(&self, client_id: &ClientId, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::client_id.eq(client_id.as_str()))
            .order((
                transactions::transaction_date.desc(),
                transactions::id.desc(),
            ))
            .limit(limit)
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn insert_batch(&self, batch: Vec<NewTransaction>) -> Result<usize> {
        let now = now_naive();
        let rows: Vec<NewTransactionDB> = batch
            .into_iter()
            .map(|tx| NewTransactionDB::from_domain(tx, now))
            .collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::insert_into(transactions::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
