pub mod conversation;
pub mod error;
pub mod keywords;
pub mod prompts;
pub mod query;
pub mod strategy;

pub use conversation::ConversationRouter;
pub use error::RouterError;
pub use keywords::KEYWORD_ROUTES;
pub use query::{QueryRouter, Route};
pub use strategy::{ChatResponder, Classifier, Extractor, PromptedModel};
