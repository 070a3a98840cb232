use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LlmConfig;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model api returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("could not decode model output: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected model output: {0}")]
    Shape(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Minimal client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Some(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
        }))
    }

    #[instrument(skip(self, system, user), fields(model = %self.model))]
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text.chars().take(512).collect(),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;
        debug!(chars = content.len(), "model response received");
        Ok(content)
    }
}

/// Removes a surrounding markdown code fence (optionally tagged `json`).
pub fn strip_code_fence(content: &str) -> &str {
    lazy_static! {
        static ref FENCE_RE: Regex =
            Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("valid fence regex");
    }
    match FENCE_RE.captures(content).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => content.trim(),
    }
}
