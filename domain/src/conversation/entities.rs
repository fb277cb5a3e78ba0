//! Conversation domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// A message in a conversation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Content must not be empty once surrounding whitespace is removed.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// An ordered chat history (Entity)
///
/// Insertion order is chronological order. The last message is expected
/// to be the new user turn, but turn alternation is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Check the conversation invariants: at least one message and no
    /// message with blank content.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.messages.is_empty() {
            return Err(DomainError::EmptyConversation);
        }
        if let Some(index) = self.messages.iter().position(|m| !m.has_content()) {
            return Err(DomainError::EmptyContent { index });
        }
        Ok(())
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);
        assert_eq!(
            "User".parse::<Role>(),
            Err(DomainError::UnknownRole("User".to_string()))
        );
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_validate_empty_conversation() {
        assert_eq!(
            Conversation::default().validate(),
            Err(DomainError::EmptyConversation)
        );
    }

    #[test]
    fn test_validate_blank_content() {
        let conversation = Conversation::new(vec![Message::user("hello"), Message::user(" \n\t")]);
        assert_eq!(
            conversation.validate(),
            Err(DomainError::EmptyContent { index: 1 })
        );
    }

    #[test]
    fn test_validate_ok() {
        let conversation = Conversation::new(vec![
            Message::system("Answer briefly."),
            Message::user("hello"),
        ]);
        assert!(conversation.validate().is_ok());
    }
}
