//! Chat and chat member entities

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::channel::Channel;
use crate::error::ChatError;

use super::ChatType;

/// Reserved UID of the chat standing for the user behind the master channel
pub const SELF_CHAT_UID: &str = "__self__";
/// Reserved UID of channel-level and group-level system chats
pub const SYSTEM_CHAT_UID: &str = "__system__";

const SELF_CHAT_NAME: &str = "You";
const SYSTEM_CHAT_NAME: &str = "System";

/// Identity of a chat: channel ID plus chat UID
///
/// Used as a non-owning reference from a member to its group and as the
/// key of [`ChatRegistry`](crate::ChatRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatKey {
    pub channel_id: Option<String>,
    pub chat_uid: Option<String>,
}

impl ChatKey {
    pub fn new(channel_id: impl Into<String>, chat_uid: impl Into<String>) -> Self {
        Self {
            channel_id: Some(channel_id.into()),
            chat_uid: Some(chat_uid.into()),
        }
    }

    /// Both parts of the identity are present
    pub fn is_complete(&self) -> bool {
        self.channel_id.is_some() && self.chat_uid.is_some()
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.channel_id.as_deref().unwrap_or("?"),
            self.chat_uid.as_deref().unwrap_or("?")
        )
    }
}

/// A chat, or a member of a group chat
///
/// Equality and hashing only look at `channel_id` and `chat_uid`; every
/// other field is display or bookkeeping data.
///
/// A group owns its `members`. Each member refers back to its group by
/// [`ChatKey`] only, so cloning a member never copies the group, and the
/// reference goes stale if the group's identity changes afterwards.
#[derive(Debug, Clone)]
pub struct ChatEntity {
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub channel_emoji: Option<String>,
    pub chat_name: Option<String>,
    /// Alternative name, usually set by the user
    pub chat_alias: Option<String>,
    pub chat_type: Option<ChatType>,
    /// Unique within the channel
    pub chat_uid: Option<String>,
    /// `false` when this entity is a member inside a group
    pub is_chat: bool,
    pub members: Vec<ChatEntity>,
    /// Owning group of a member
    pub group: Option<ChatKey>,
    pub vendor_specific: HashMap<String, serde_json::Value>,
}

impl ChatEntity {
    /// Entity with no channel information and all chat fields unset
    pub fn empty() -> Self {
        Self {
            channel_id: None,
            channel_name: None,
            channel_emoji: None,
            chat_name: None,
            chat_alias: None,
            chat_type: None,
            chat_uid: None,
            is_chat: true,
            members: Vec::new(),
            group: None,
            vendor_specific: HashMap::new(),
        }
    }

    /// Entity seeded with the channel's ID, name and emoji
    pub fn from_channel(channel: &impl Channel) -> Self {
        Self {
            channel_id: Some(channel.channel_id().to_string()),
            channel_name: Some(channel.channel_name().to_string()),
            channel_emoji: Some(channel.channel_emoji().to_string()),
            ..Self::empty()
        }
    }

    /// Set this chat as the user behind the master channel.
    pub fn as_self(&mut self) -> &mut Self {
        self.chat_name = Some(SELF_CHAT_NAME.to_string());
        self.chat_alias = None;
        self.chat_uid = Some(SELF_CHAT_UID.to_string());
        self.chat_type = Some(ChatType::User);
        self
    }

    /// Set this chat as a system chat.
    ///
    /// The type stays `User`; adapters wanting a distinct classification
    /// can set `ChatType::System` themselves.
    pub fn as_system(&mut self) -> &mut Self {
        self.chat_name = Some(SYSTEM_CHAT_NAME.to_string());
        self.chat_alias = None;
        self.chat_uid = Some(SYSTEM_CHAT_UID.to_string());
        self.chat_type = Some(ChatType::User);
        self
    }

    pub fn is_self(&self) -> bool {
        self.chat_uid.as_deref() == Some(SELF_CHAT_UID)
    }

    pub fn is_system(&self) -> bool {
        self.chat_uid.as_deref() == Some(SYSTEM_CHAT_UID)
    }

    pub fn is_group(&self) -> bool {
        self.chat_type == Some(ChatType::Group)
    }

    /// Assign a UID, refusing the reserved sentinel values.
    pub fn set_chat_uid(&mut self, uid: impl Into<String>) -> Result<&mut Self, ChatError> {
        let uid = uid.into();
        if uid == SELF_CHAT_UID || uid == SYSTEM_CHAT_UID {
            return Err(ChatError::ReservedUid { uid });
        }
        self.chat_uid = Some(uid);
        Ok(self)
    }

    pub fn key(&self) -> ChatKey {
        ChatKey {
            channel_id: self.channel_id.clone(),
            chat_uid: self.chat_uid.clone(),
        }
    }

    /// Equality against a value of unknown type.
    ///
    /// Anything other than a `ChatEntity` or `ChatKey` compares unequal.
    pub fn matches_any(&self, other: &dyn Any) -> bool {
        if let Some(chat) = other.downcast_ref::<ChatEntity>() {
            self == chat
        } else if let Some(key) = other.downcast_ref::<ChatKey>() {
            self == key
        } else {
            false
        }
    }

    /// Alias if set, otherwise the chat name
    pub fn display_name(&self) -> Option<&str> {
        self.chat_alias.as_deref().or(self.chat_name.as_deref())
    }

    /// `alias (name)` when both are set and differ, otherwise the display name
    pub fn long_name(&self) -> Option<String> {
        match (self.chat_alias.as_deref(), self.chat_name.as_deref()) {
            (Some(alias), Some(name)) if alias != name => Some(format!("{} ({})", alias, name)),
            _ => self.display_name().map(str::to_string),
        }
    }

    /// Add a member to this group.
    ///
    /// Only chats typed `Group`, or not typed yet, accept members. The
    /// member is marked as a non-chat entity pointing back at this group
    /// and loses any members of its own. A member with the same identity
    /// is replaced in place so insertion order of the others is kept.
    pub fn add_member(&mut self, mut member: ChatEntity) -> Result<&mut ChatEntity, ChatError> {
        let groupable = matches!(self.chat_type, None | Some(ChatType::Group));
        if !self.is_chat || !groupable {
            return Err(ChatError::NotAGroup {
                uid: self.chat_uid.clone().unwrap_or_default(),
            });
        }

        if !member.members.is_empty() {
            tracing::debug!(
                "Dropping {} nested member(s) of {}",
                member.members.len(),
                member.key()
            );
            member.members.clear();
        }
        member.is_chat = false;
        member.group = Some(self.key());

        let index = match self.members.iter().position(|m| *m == member) {
            Some(index) => {
                tracing::debug!("Replacing member {} in {}", member.key(), self.key());
                self.members[index] = member;
                index
            }
            None => {
                tracing::debug!("Adding member {} to {}", member.key(), self.key());
                self.members.push(member);
                self.members.len() - 1
            }
        };

        Ok(&mut self.members[index])
    }

    pub fn member(&self, chat_uid: &str) -> Option<&ChatEntity> {
        self.members
            .iter()
            .find(|m| m.chat_uid.as_deref() == Some(chat_uid))
    }

    /// Remove a member by UID, detaching it from this group.
    ///
    /// The returned entity is a standalone chat again.
    pub fn remove_member(&mut self, chat_uid: &str) -> Option<ChatEntity> {
        let index = self
            .members
            .iter()
            .position(|m| m.chat_uid.as_deref() == Some(chat_uid))?;
        let mut member = self.members.remove(index);
        member.group = None;
        member.is_chat = true;
        tracing::debug!("Removed member {} from {}", member.key(), self.key());
        Some(member)
    }
}

impl Default for ChatEntity {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fresh "yourself" chat for a channel
pub fn make_self_chat(channel: &impl Channel) -> ChatEntity {
    let mut chat = ChatEntity::from_channel(channel);
    chat.as_self();
    chat
}

/// Fresh system chat for a channel
pub fn make_system_chat(channel: &impl Channel) -> ChatEntity {
    let mut chat = ChatEntity::from_channel(channel);
    chat.as_system();
    chat
}

impl PartialEq for ChatEntity {
    fn eq(&self, other: &Self) -> bool {
        self.channel_id == other.channel_id && self.chat_uid == other.chat_uid
    }
}

impl Eq for ChatEntity {}

impl Hash for ChatEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channel_id.hash(state);
        self.chat_uid.hash(state);
    }
}

impl PartialEq<ChatKey> for ChatEntity {
    fn eq(&self, other: &ChatKey) -> bool {
        self.channel_id == other.channel_id && self.chat_uid == other.chat_uid
    }
}

impl PartialEq<ChatEntity> for ChatKey {
    fn eq(&self, other: &ChatEntity) -> bool {
        other == self
    }
}

impl fmt::Display for ChatEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(emoji) = self.channel_emoji.as_deref().filter(|e| !e.is_empty()) {
            write!(f, "{} ", emoji)?;
        }
        if let Some(channel) = self.channel_name.as_deref() {
            write!(f, "{}: ", channel)?;
        }
        match self.long_name() {
            Some(name) => f.write_str(&name)?,
            None => f.write_str("(unnamed)")?,
        }
        if let Some(uid) = self.chat_uid.as_deref() {
            write!(f, " [{}]", uid)?;
        }
        Ok(())
    }
}
