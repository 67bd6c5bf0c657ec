//! Error types for the chat model

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat UID {uid:?} is reserved for sentinel chats")]
    ReservedUid { uid: String },

    #[error("Chat is missing {field}; channel_id and chat_uid are both required")]
    IncompleteIdentity { field: &'static str },

    #[error("Chat {uid:?} is not a group and cannot hold members")]
    NotAGroup { uid: String },

    #[error("Unknown chat type: {0}")]
    UnknownChatType(String),
}
