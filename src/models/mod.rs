//! Data models for chats and chat members

mod chat;
mod chat_type;

pub use chat::*;
pub use chat_type::*;
