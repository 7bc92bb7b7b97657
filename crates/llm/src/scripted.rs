use crate::LanguageModel;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

enum Reply {
    Text(String),
    Failure(String),
}

/// Deterministic model for tests and offline runs.
///
/// Queued replies are returned in order; once the queue is empty every call
/// gets the fallback reply. Every prompt is recorded.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: String::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = Self::new();
        for reply in replies {
            model.push_reply(reply);
        }
        model
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.replies).push_back(Reply::Text(reply.into()));
    }

    /// Queues an error in place of the next reply.
    pub fn push_failure(&self, message: impl Into<String>) {
        lock(&self.replies).push_back(Reply::Failure(message.into()));
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        lock(&self.prompts).push(prompt.to_string());

        match lock(&self.replies).pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(self.fallback.clone()),
        }
    }
}
