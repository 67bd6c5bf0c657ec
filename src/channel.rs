//! Channel descriptors
//!
//! A channel is the platform adapter that originates chats. The model only
//! needs its identifying strings, read once when an entity is created.

use serde::{Deserialize, Serialize};

/// Identifying data a channel exposes to the chats it creates
pub trait Channel {
    fn channel_id(&self) -> &str;
    fn channel_name(&self) -> &str;
    fn channel_emoji(&self) -> &str;
}

/// Owned channel descriptor, as listed in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub channel_id: String,
    pub channel_name: String,
    #[serde(default)]
    pub channel_emoji: String,
}

impl ChannelDescriptor {
    pub fn new(
        channel_id: impl Into<String>,
        channel_name: impl Into<String>,
        channel_emoji: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_name: channel_name.into(),
            channel_emoji: channel_emoji.into(),
        }
    }
}

impl Channel for ChannelDescriptor {
    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn channel_name(&self) -> &str {
        &self.channel_name
    }

    fn channel_emoji(&self) -> &str {
        &self.channel_emoji
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_emoji_defaults_to_empty() {
        let desc: ChannelDescriptor =
            toml::from_str("channel_id = \"irc\"\nchannel_name = \"IRC\"").unwrap();
        assert_eq!(desc.channel_id(), "irc");
        assert_eq!(desc.channel_name(), "IRC");
        assert_eq!(desc.channel_emoji(), "");
    }
}
