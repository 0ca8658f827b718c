use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::clients::ClientId;
use crate::constants::{DEFAULT_TRANSACTIONS_LIMIT, MAX_LIST_LIMIT, TRANSACTION_BATCH_SIZE};
use crate::errors::Result;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_client_transactions(
        &self,
        client_id: &ClientId,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let limit = limit
            .unwrap_or(DEFAULT_TRANSACTIONS_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        self.repository.list_by_client(client_id, limit)
    }

    async fn import_transactions(&self, transactions: Vec<NewTransaction>) -> Result<usize> {
        let (valid, invalid): (Vec<_>, Vec<_>) =
            transactions.into_iter().partition(|t| t.validate().is_ok());
        if !invalid.is_empty() {
            warn!("Skipping {} transactions without client or date", invalid.len());
        }

        let mut inserted = 0;
        for batch in valid.chunks(TRANSACTION_BATCH_SIZE) {
            inserted += self.repository.insert_batch(batch.to_vec()).await?;
        }
        info!("Imported {} transactions", inserted);
        Ok(inserted)
    }
}
