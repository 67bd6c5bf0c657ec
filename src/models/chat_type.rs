//! Chat classification

use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// Chat type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatType {
    User,
    Group,
    System,
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChatType::User => "User",
            ChatType::Group => "Group",
            ChatType::System => "System",
        };
        f.write_str(name)
    }
}

impl FromStr for ChatType {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ChatType::User),
            "group" => Ok(ChatType::Group),
            "system" => Ok(ChatType::System),
            _ => Err(ChatError::UnknownChatType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("user".parse::<ChatType>().unwrap(), ChatType::User);
        assert_eq!("GROUP".parse::<ChatType>().unwrap(), ChatType::Group);
        assert_eq!("System".parse::<ChatType>().unwrap(), ChatType::System);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "channel".parse::<ChatType>(),
            Err(ChatError::UnknownChatType("channel".to_string()))
        );
    }

    #[test]
    fn test_display_matches_variant() {
        assert_eq!(ChatType::Group.to_string(), "Group");
    }
}
