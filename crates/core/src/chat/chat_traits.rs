use async_trait::async_trait;

use super::chat_model::{ChatMessage, NewChatMessage};
use crate::clients::ClientId;
use crate::errors::Result;

/// Trait for chat log repository operations
#[async_trait]
pub trait ChatRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list_recent(&self, client_id: &ClientId, limit: i64) -> Result<Vec<ChatMessage>>;
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage>;
}

/// Trait for chat log service operations
#[async_trait]
pub trait ChatServiceTrait: Send + Sync {
    fn get_history(&self, client_id: &ClientId, limit: Option<i64>) -> Result<Vec<ChatMessage>>;
    async fn record_exchange(&self, message: NewChatMessage) -> Result<ChatMessage>;
}
