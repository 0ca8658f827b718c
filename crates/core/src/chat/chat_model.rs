use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clients::ClientId;
use crate::errors::{Error, Result, ValidationError};

/// One question/answer exchange between a client and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i32,
    pub client_id: ClientId,
    pub message: String,
    pub response: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub client_id: ClientId,
    pub message: String,
    pub response: String,
}

impl NewChatMessage {
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "message".to_string(),
            )));
        }
        Ok(())
    }
}
