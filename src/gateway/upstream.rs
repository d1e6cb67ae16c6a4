//! Upstream chat-completion client.
//!
//! # Responsibilities
//! - Build the two-message chat request for a mode
//! - POST it with bearer authorization to `{base}/chat/completions`
//! - Enforce a single wall-clock deadline over send + body read
//! - Extract the first choice's message content
//!
//! # Design Decisions
//! - One attempt per call, no retries
//! - Timeout errors are distinct from other errors
//! - No connection is pooled across calls

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::env::UpstreamConfig;
use crate::gateway::error::{truncate_chars, UpstreamError, UPSTREAM_BODY_LIMIT};
use crate::gateway::prompts::{Mode, PromptTable};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 500;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can turn a validated note into a reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        text: &str,
        mode: Mode,
        config: &UpstreamConfig,
    ) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
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
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible completion client backed by `reqwest`.
pub struct UpstreamClient {
    http: Client,
    prompts: Arc<PromptTable>,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(prompts: Arc<PromptTable>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self::from_client(http, prompts))
    }

    /// Wrap a preconfigured `reqwest` client (proxy settings, TLS roots).
    pub fn from_client(http: Client, prompts: Arc<PromptTable>) -> Self {
        Self {
            http,
            prompts,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange(&self, url: &str, api_key: &str, body: &ChatRequest<'_>) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
                body: truncate_chars(&text, UPSTREAM_BODY_LIMIT),
            });
        }

        let bytes = response.bytes().await?;
        extract_reply(&bytes)
    }
}

#[async_trait]
impl CompletionClient for UpstreamClient {
    async fn complete(
        &self,
        text: &str,
        mode: Mode,
        config: &UpstreamConfig,
    ) -> Result<String, UpstreamError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(UpstreamError::Misconfigured)?;

        let body = build_request(&config.model, self.prompts.get(mode), text);
        let url = config.completions_url();

        tracing::debug!(url = %url, model = %config.model, mode = %mode, "Calling upstream");

        // Dropping the exchange future on expiry aborts the in-flight connection.
        match timeout(self.timeout, self.exchange(&url, api_key, &body)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        }
    }
}

fn build_request<'a>(model: &'a str, system_prompt: &'a str, text: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: system_prompt,
            },
            ChatMessage {
                role: "user",
                content: text,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Pull the trimmed first-choice content out of a completion body.
fn extract_reply(body: &[u8]) -> Result<String, UpstreamError> {
    let parsed: ChatResponse =
        serde_json::from_slice(body).map_err(|_| UpstreamError::BadResponse)?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or(UpstreamError::BadResponse)
}
