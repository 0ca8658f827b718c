use async_trait::async_trait;

use super::clients_model::{Client, ClientSeed, NewClient, SeededClient};
use super::ClientId;
use crate::errors::Result;

/// Trait for client repository operations
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    fn get_by_client_id(&self, client_id: &ClientId) -> Result<Option<Client>>;
    fn list(&self) -> Result<Vec<Client>>;
    fn exists(&self, client_id: &ClientId) -> Result<bool>;
    async fn create(&self, new_client: NewClient) -> Result<Client>;
    /// Inserts a client with its portfolio, allocations and performance
    /// history in a single transaction.
    async fn create_seeded(&self, seed: ClientSeed) -> Result<SeededClient>;
    /// Deletes every client together with its portfolio data and chat log.
    async fn delete_all(&self) -> Result<usize>;
}

/// Trait for client service operations
#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>>;
    fn list_clients(&self) -> Result<Vec<Client>>;
    async fn create_client(&self, new_client: NewClient) -> Result<Client>;
    async fn create_seeded_client(&self, seed: ClientSeed) -> Result<SeededClient>;
    async fn reset_client_data(&self) -> Result<usize>;
}
