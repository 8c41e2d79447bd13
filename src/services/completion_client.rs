use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// The one external-service operation this system depends on: prompt text
/// in, response text out. Synchronous from the caller's perspective; no
/// streaming, no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// OpenAI-compatible chat-completions client, pointed at Groq by default.
pub struct GroqCompletionClient {
    http: reqwest::Client,
    api_base: String,
    api_key: SecretString,
    model: String,
}

impl GroqCompletionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.llm_api_base.trim_end_matches('/').to_string(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for GroqCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("completion service returned {}: {}", status, body);
            return Err(AppError::UpstreamError(format!(
                "completion service returned {}",
                status
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("unreadable completion body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::UpstreamError("completion response had no choices".into()))
    }
}

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("JSON_FENCE is a valid regex pattern")
});

/// Pull the JSON payload out of a completion response. Models are told to
/// return bare JSON but routinely wrap it in markdown fences or prose, so
/// fall back to the outermost braces before giving up.
pub fn extract_json_payload(response: &str) -> Option<&str> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }

    if let Some(captures) = JSON_FENCE.captures(trimmed) {
        if let Some(inner) = captures.get(1) {
            let inner = inner.as_str().trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if start < end {
        Some(&trimmed[start..=end])
    } else {
        None
    }
}
