//! Owning store of chats keyed by identity
//!
//! Members keep only the [`ChatKey`] of their group; the registry is where
//! that key is turned back into the group entity.

use std::collections::BTreeMap;

use crate::error::ChatError;
use crate::models::{ChatEntity, ChatKey};

#[derive(Debug, Default)]
pub struct ChatRegistry {
    chats: BTreeMap<ChatKey, ChatEntity>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a chat, returning the entry it replaced.
    ///
    /// Both `channel_id` and `chat_uid` must be set.
    pub fn insert(&mut self, chat: ChatEntity) -> Result<Option<ChatEntity>, ChatError> {
        if chat.channel_id.is_none() {
            return Err(ChatError::IncompleteIdentity { field: "channel_id" });
        }
        if chat.chat_uid.is_none() {
            return Err(ChatError::IncompleteIdentity { field: "chat_uid" });
        }

        let key = chat.key();
        let previous = self.chats.insert(key.clone(), chat);
        if previous.is_some() {
            tracing::warn!("Replaced existing chat {}", key);
        } else {
            tracing::debug!("Registered chat {}", key);
        }
        Ok(previous)
    }

    pub fn get(&self, key: &ChatKey) -> Option<&ChatEntity> {
        self.chats.get(key)
    }

    pub fn get_mut(&mut self, key: &ChatKey) -> Option<&mut ChatEntity> {
        self.chats.get_mut(key)
    }

    pub fn remove(&mut self, key: &ChatKey) -> Option<ChatEntity> {
        self.chats.remove(key)
    }

    pub fn contains(&self, key: &ChatKey) -> bool {
        self.chats.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatEntity> {
        self.chats.values()
    }

    /// Resolve a member's back-reference to its group
    pub fn group_of(&self, member: &ChatEntity) -> Option<&ChatEntity> {
        member.group.as_ref().and_then(|key| self.chats.get(key))
    }

    /// Chats belonging to one channel, ordered by UID
    pub fn by_channel<'a>(&'a self, channel_id: &'a str) -> impl Iterator<Item = &'a ChatEntity> {
        self.chats
            .iter()
            .filter(move |(key, _)| key.channel_id.as_deref() == Some(channel_id))
            .map(|(_, chat)| chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatType;

    fn chat(channel_id: &str, chat_uid: &str) -> ChatEntity {
        ChatEntity {
            channel_id: Some(channel_id.to_string()),
            chat_uid: Some(chat_uid.to_string()),
            ..ChatEntity::empty()
        }
    }

    #[test]
    fn test_insert_requires_identity() {
        let mut registry = ChatRegistry::new();
        assert_eq!(
            registry.insert(ChatEntity::empty()),
            Err(ChatError::IncompleteIdentity { field: "channel_id" })
        );

        let mut no_uid = ChatEntity::empty();
        no_uid.channel_id = Some("irc".to_string());
        assert_eq!(
            registry.insert(no_uid),
            Err(ChatError::IncompleteIdentity { field: "chat_uid" })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_replaces_same_identity() {
        let mut registry = ChatRegistry::new();
        let mut first = chat("irc", "alice");
        first.chat_name = Some("Alice".to_string());
        assert!(registry.insert(first).unwrap().is_none());

        let mut second = chat("irc", "alice");
        second.chat_name = Some("Alice B.".to_string());
        let old = registry.insert(second).unwrap().unwrap();
        assert_eq!(old.chat_name.as_deref(), Some("Alice"));

        assert_eq!(registry.len(), 1);
        let stored = registry.get(&ChatKey::new("irc", "alice")).unwrap();
        assert_eq!(stored.chat_name.as_deref(), Some("Alice B."));
    }

    #[test]
    fn test_group_of_resolves_back_reference() {
        let mut group = chat("irc", "#rust");
        group.chat_type = Some(ChatType::Group);
        group.add_member(chat("irc", "alice")).unwrap();
        let member = group.members[0].clone();

        let mut registry = ChatRegistry::new();
        assert!(registry.group_of(&member).is_none());
        registry.insert(group).unwrap();

        let resolved = registry.group_of(&member).unwrap();
        assert_eq!(resolved.chat_uid.as_deref(), Some("#rust"));
        assert_eq!(resolved.members.len(), 1);
        assert!(registry.group_of(&chat("irc", "bob")).is_none());
    }

    #[test]
    fn test_by_channel_filters_and_orders() {
        let mut registry = ChatRegistry::new();
        registry.insert(chat("irc", "b")).unwrap();
        registry.insert(chat("telegram", "a")).unwrap();
        registry.insert(chat("irc", "a")).unwrap();

        let uids: Vec<_> = registry
            .by_channel("irc")
            .map(|c| c.chat_uid.as_deref().unwrap())
            .collect();
        assert_eq!(uids, ["a", "b"]);
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn test_remove_and_mutate() {
        let mut registry = ChatRegistry::new();
        registry.insert(chat("irc", "alice")).unwrap();
        let key = ChatKey::new("irc", "alice");

        registry.get_mut(&key).unwrap().chat_alias = Some("Ally".to_string());
        assert_eq!(
            registry.get(&key).unwrap().chat_alias.as_deref(),
            Some("Ally")
        );

        assert!(registry.remove(&key).is_some());
        assert!(!registry.contains(&key));
    }
}
