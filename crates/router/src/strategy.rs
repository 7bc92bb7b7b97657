use crate::prompts::{extraction_prompt, general_chat_prompt, routing_prompt};
use anyhow::Result;
use async_trait::async_trait;
use llm::LanguageModel;

/// Picks a tool name (or `general_chat`) for a query.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, query: &str, tool_listing: &str) -> Result<String>;
}

/// Pulls the single argument a tool needs out of a raw query.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, query: &str, tool_description: &str) -> Result<String>;
}

/// Produces a conversational reply from recent context.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn respond(&self, context: &str, message: &str) -> Result<String>;
}

/// Implements every strategy by prompting one language model.
pub struct PromptedModel<M> {
    model: M,
}

impl<M: LanguageModel> PromptedModel<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> Classifier for PromptedModel<M> {
    async fn classify(&self, query: &str, tool_listing: &str) -> Result<String> {
        self.model
            .complete(&routing_prompt(query, tool_listing))
            .await
    }
}

#[async_trait]
impl<M: LanguageModel> Extractor for PromptedModel<M> {
    async fn extract(&self, query: &str, tool_description: &str) -> Result<String> {
        self.model
            .complete(&extraction_prompt(query, tool_description))
            .await
    }
}

#[async_trait]
impl<M: LanguageModel> ChatResponder for PromptedModel<M> {
    async fn respond(&self, context: &str, message: &str) -> Result<String> {
        self.model
            .complete(&general_chat_prompt(context, message))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::ScriptedModel;

    #[tokio::test]
    async fn should_send_routing_prompt_to_model() {
        let prompted = PromptedModel::new(ScriptedModel::with_replies(["calculator"]));

        let answer = prompted
            .classify("Calculate 5 * 3", "- calculator: math")
            .await
            .unwrap();

        assert_eq!(answer, "calculator");
        assert_eq!(
            prompted.model().prompts(),
            vec![routing_prompt("Calculate 5 * 3", "- calculator: math")]
        );
    }

    #[tokio::test]
    async fn should_send_extraction_prompt_to_model() {
        let prompted = PromptedModel::new(ScriptedModel::with_replies(["5 * 3"]));

        let answer = prompted.extract("Calculate 5 * 3", "math").await.unwrap();

        assert_eq!(answer, "5 * 3");
        assert_eq!(
            prompted.model().prompts(),
            vec![extraction_prompt("Calculate 5 * 3", "math")]
        );
    }

    #[tokio::test]
    async fn should_send_general_chat_prompt_to_model() {
        let prompted = PromptedModel::new(ScriptedModel::with_replies(["Doing well!"]));

        let answer = prompted.respond("user: Hi", "Hi").await.unwrap();

        assert_eq!(answer, "Doing well!");
        assert_eq!(
            prompted.model().prompts(),
            vec![general_chat_prompt("user: Hi", "Hi")]
        );
    }

    #[tokio::test]
    async fn should_propagate_model_failure() {
        let model = ScriptedModel::new();
        model.push_failure("network down");
        let prompted = PromptedModel::new(model);

        assert!(prompted.classify("q", "tools").await.is_err());
    }
}
