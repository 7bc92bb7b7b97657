use crate::models::{GenerateContentRequest, GenerateContentResponse, ModelConfig};
use crate::LanguageModel;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use std::time::Duration;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Exponential backoff from one second, capped at `MAX_BACKOFF`.
fn backoff_delay(attempt: u32) -> Duration {
    let millis = 2_u64.saturating_pow(attempt).saturating_mul(1000);
    Duration::from_millis(millis).min(MAX_BACKOFF)
}

/// Text completion through the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    config: ModelConfig,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key is empty");
        }

        info!("Initializing GeminiClient for model {}", config.model);
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn try_complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::new(prompt, &self.config);

        debug!("POST {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Gemini returned {}: {}", status, body);
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        parsed
            .text()
            .ok_or_else(|| anyhow::anyhow!("Gemini response contained no candidate text"))
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.try_complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    error!("Gemini attempt {} failed: {:#}", attempt + 1, e);
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        tokio::time::sleep(backoff_delay(attempt)).await;
                    }
                }
            }
        }

        let attempts = self.config.max_retries.saturating_add(1);
        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("Gemini request was never attempted"))
            .context(format!("Gemini request failed after {} attempts", attempts)))
    }
}
