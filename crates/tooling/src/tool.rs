use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reserved routing token meaning "no tool, answer conversationally".
pub const GENERAL_CHAT: &str = "general_chat";

const MAX_TOOL_NAME_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolNameError {
    #[error("tool name is empty")]
    Empty,
    #[error("tool name '{0}' is longer than 64 bytes")]
    TooLong(String),
    #[error("tool name '{0}' must start with a lowercase letter and contain only [a-z0-9_]")]
    InvalidCharacters(String),
    #[error("'general_chat' is reserved and cannot name a tool")]
    Reserved,
}

/// A validated tool identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Result<Self, ToolNameError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ToolNameError::Empty);
        }
        if name.len() > MAX_TOOL_NAME_LEN {
            return Err(ToolNameError::TooLong(name));
        }
        let mut chars = name.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let rest_valid = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !starts_with_letter || !rest_valid {
            return Err(ToolNameError::InvalidCharacters(name));
        }
        if name == GENERAL_CHAT {
            return Err(ToolNameError::Reserved);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ToolName {
    type Err = ToolNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ToolName {
    type Error = ToolNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        name.0
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The built-in tools shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Weather,
    Calculator,
    News,
    DateTime,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Weather,
        ToolKind::Calculator,
        ToolKind::News,
        ToolKind::DateTime,
    ];

    pub fn name_str(&self) -> &'static str {
        match self {
            ToolKind::Weather => "weather_search",
            ToolKind::Calculator => "calculator",
            ToolKind::News => "news_search",
            ToolKind::DateTime => "date_time",
        }
    }

    pub fn name(&self) -> ToolName {
        // Every built-in name is a valid identifier; see should_validate_builtin_names.
        ToolName(self.name_str().to_string())
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Weather => "Get current weather information for a specific location",
            ToolKind::Calculator => "Perform basic mathematical calculations",
            ToolKind::News => "Search for recent news articles on a specific topic",
            ToolKind::DateTime => "Get current date and time for a specific location",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    pub tool_name: String,
    pub message: String,
    pub recoverable: bool,
}

impl ToolError {
    pub fn new(tool_name: impl Into<String>, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            tool_name: tool_name.into(),
            message: message.into(),
            recoverable,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tool '{}' error: {}", self.tool_name, self.message)
    }
}

impl std::error::Error for ToolError {}

/// A named operation over one string parameter.
pub trait Tool: Send + Sync {
    fn name(&self) -> &ToolName;
    fn description(&self) -> &str;

    fn run(&self, parameter: &str) -> Result<String, ToolError>;

    /// Rejects blank parameters; built-in tools call this before doing any work.
    fn require_parameter<'a>(&self, parameter: &'a str) -> Result<&'a str, ToolError> {
        let trimmed = parameter.trim();
        if trimmed.is_empty() {
            return Err(ToolError::new(
                self.name().as_str(),
                "Expected a non-empty input",
                true,
            ));
        }
        Ok(trimmed)
    }
}
