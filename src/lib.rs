//! Chat identity model for cross-platform message forwarding
//!
//! A [`ChatEntity`] represents either a conversation or a member inside a
//! group conversation. Entities from any channel share the same identity
//! rule: two entities are the same chat when their channel ID and chat UID
//! match.

pub mod channel;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;

pub use channel::{Channel, ChannelDescriptor};
pub use error::ChatError;
pub use models::*;
pub use registry::ChatRegistry;
