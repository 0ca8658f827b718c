use chrono::NaiveDateTime;
use diesel::prelude::*;

use wealthdesk_core::chat::ChatMessage;
use wealthdesk_core::clients::ClientId;

/// `client_id` is the internal row id of the client.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::chat_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatMessageDB {
    pub id: i32,
    pub client_id: i32,
    pub message: String,
    pub response: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::chat_messages)]
pub struct NewChatMessageDB {
    pub client_id: i32,
    pub message: String,
    pub response: String,
    pub timestamp: NaiveDateTime,
}

impl ChatMessageDB {
    pub fn into_domain(self, client_id: ClientId) -> ChatMessage {
        ChatMessage {
            id: self.id,
            client_id,
            message: self.message,
            response: self.response,
            timestamp: self.timestamp,
        }
    }
}
