use thiserror::Error;
use tooling::ToolError;

/// Failures inside the routing flow. `Display` is the text shown to the user.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("I'm not sure how to help with that. Please rephrase.")]
    UnknownTool(String),

    #[error("Error extracting tool input: {0}")]
    Extraction(String),

    #[error("Error executing tool: {0}")]
    ToolExecution(#[from] ToolError),

    #[error("I'm having trouble with the AI service: {0}")]
    ModelUnavailable(String),
}
