use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod history;

pub use config::{Config, LlmConfig, RouterConfig};
pub use history::ConversationHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Renders as `role: content`, the line format used for chat context.
impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_role_enum() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"User\"");

        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"Assistant\"");
    }

    #[test]
    fn should_deserialize_role_enum() {
        let role: Role = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(role, Role::User);

        let role: Role = serde_json::from_str("\"Assistant\"").unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn should_render_role_in_lowercase() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn should_serialize_turn_struct() {
        let turn = ConversationTurn::user("Hello, world!");

        let json = serde_json::to_string(&turn).unwrap();
        let expected = r#"{"role":"User","content":"Hello, world!"}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn should_render_turn_as_context_line() {
        let turn = ConversationTurn::assistant("Hi there!");
        assert_eq!(turn.to_string(), "assistant: Hi there!");
    }
}
