use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{ChatMessageDB, NewChatMessageDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{chat_messages, clients};
use wealthdesk_core::chat::{ChatMessage, ChatRepositoryTrait, NewChatMessage};
use wealthdesk_core::clients::ClientId;
use wealthdesk_core::utils::time_utils::now_naive;
use wealthdesk_core::{Error, Result};

pub struct ChatRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChatRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ChatRepositoryTrait for ChatRepository {
    fn list_recent(&self, client_id: &ClientId, limit: i64) -> Result<Vec<ChatMessage>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = chat_messages::table
            .inner_join(clients::table)
            .filter(clients::client_id.eq(client_id.as_str()))
            .order((chat_messages::timestamp.desc(), chat_messages::id.desc()))
            .limit(limit)
            .select(ChatMessageDB::as_select())
            .load::<ChatMessageDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_domain(client_id.clone()))
            .collect())
    }

    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ChatMessage> {
                let client_row_id = clients::table
                    .filter(clients::client_id.eq(message.client_id.as_str()))
                    .select(clients::id)
                    .first::<i32>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Client {}", message.client_id)))?;

                let row = NewChatMessageDB {
                    client_id: client_row_id,
                    message: message.message,
                    response: message.response,
                    timestamp: now_naive(),
                };
                let created = diesel::insert_into(chat_messages::table)
                    .values(&row)
                    .returning(ChatMessageDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(created.into_domain(message.client_id))
            })
            .await
    }
}
