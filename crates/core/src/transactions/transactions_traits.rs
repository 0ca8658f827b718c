use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction};
use crate::clients::ClientId;
use crate::errors::Result;

#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Ordered by transaction date, newest first.
    fn list_by_client(&self, client_id: &ClientId, limit: i64) -> Result<Vec<Transaction>>;
    /// Inserts the whole batch in one transaction and returns the row count.
    async fn insert_batch(&self, batch: Vec<NewTransaction>) -> Result<usize>;
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_client_transactions(
        &self,
        client_id: &ClientId,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>>;
    async fn import_transactions(&self, transactions: Vec<NewTransaction>) -> Result<usize>;
}
