pub mod gemini;
pub mod models;
pub mod scripted;

pub use gemini::GeminiClient;
pub use models::ModelConfig;
pub use scripted::ScriptedModel;

use anyhow::Result;
use async_trait::async_trait;
use router_core::LlmConfig;
use std::sync::Arc;

/// Single-prompt text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: LanguageModel + ?Sized> LanguageModel for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }
}

/// Builds the model named by `cfg.provider`. Only `gemini` is configurable and
/// it needs an API key; a `ScriptedModel` carries its own replies and is
/// constructed directly.
pub fn create_language_model(cfg: &LlmConfig) -> Result<Arc<dyn LanguageModel>> {
    match cfg.provider.as_str() {
        "gemini" => {
            let api_key = cfg
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| anyhow::anyhow!("GOOGLE_API_KEY is not set"))?;
            Ok(Arc::new(GeminiClient::new(ModelConfig::from(cfg), api_key)?))
        }
        other => anyhow::bail!("Unknown LLM provider '{}'", other),
    }
}
