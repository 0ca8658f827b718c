//! Chat module - the append-only log of advisor conversations.

mod chat_model;
mod chat_service;
mod chat_traits;

pub use chat_model::{ChatMessage, NewChatMessage};
pub use chat_service::ChatService;
pub use chat_traits::{ChatRepositoryTrait, ChatServiceTrait};
