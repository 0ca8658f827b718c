mod model;
mod repository;

pub use model::{ChatMessageDB, NewChatMessageDB};
pub use repository::ChatRepository;
