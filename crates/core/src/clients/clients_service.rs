use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::clients_model::{Client, ClientSeed, NewClient, SeededClient};
use super::clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
use super::ClientId;
use crate::errors::{Error, Result};

pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn ensure_unique(&self, client_id: &ClientId) -> Result<()> {
        if self.repository.exists(client_id)? {
            return Err(Error::ConstraintViolation(format!(
                "Client {} already exists",
                client_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientServiceTrait for ClientService {
    fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>> {
        self.repository.get_by_client_id(client_id)
    }

    fn list_clients(&self) -> Result<Vec<Client>> {
        self.repository.list()
    }

    async fn create_client(&self, new_client: NewClient) -> Result<Client> {
        new_client.validate()?;
        self.ensure_unique(&new_client.client_id)?;
        debug!("Creating client {}", new_client.client_id);
        self.repository.create(new_client).await
    }

    async fn create_seeded_client(&self, seed: ClientSeed) -> Result<SeededClient> {
        seed.client.validate()?;
        if let Some(portfolio) = &seed.portfolio {
            portfolio.validate()?;
        }
        self.ensure_unique(&seed.client.client_id)?;
        debug!(
            "Creating client {} with {} allocation rows",
            seed.client.client_id,
            seed.portfolio.as_ref().map_or(0, |p| p.allocations.len())
        );
        self.repository.create_seeded(seed).await
    }

    async fn reset_client_data(&self) -> Result<usize> {
        let removed = self.repository.delete_all().await?;
        info!("Removed {} client rows before reseed", removed);
        Ok(removed)
    }
}
