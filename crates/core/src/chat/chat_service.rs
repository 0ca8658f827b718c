use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::chat_model::{ChatMessage, NewChatMessage};
use super::chat_traits::{ChatRepositoryTrait, ChatServiceTrait};
use crate::clients::ClientId;
use crate::constants::{DEFAULT_CHAT_HISTORY_LIMIT, MAX_LIST_LIMIT};
use crate::errors::Result;

pub struct ChatService {
    repository: Arc<dyn ChatRepositoryTrait>,
}

impl ChatService {
    pub fn new(repository: Arc<dyn ChatRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ChatServiceTrait for ChatService {
    fn get_history(&self, client_id: &ClientId, limit: Option<i64>) -> Result<Vec<ChatMessage>> {
        let limit = limit
            .unwrap_or(DEFAULT_CHAT_HISTORY_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        self.repository.list_recent(client_id, limit)
    }

    async fn record_exchange(&self, message: NewChatMessage) -> Result<ChatMessage> {
        message.validate()?;
        debug!("Recording chat exchange for client {}", message.client_id);
        self.repository.append(message).await
    }
}
