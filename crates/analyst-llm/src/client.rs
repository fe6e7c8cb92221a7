//! DeepSeek API client
//!
//! A thin client over the `/chat/completions`-shaped endpoint. The client
//! holds no state between calls beyond the connection pool: every call is one
//! request, and failures are surfaced to the caller without retries.

use crate::stream::ChatStream;
use crate::{ChatProvider, ChatRequest, Completion, LlmError, Result, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://api.deepseek.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the DeepSeek client
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "https://api.deepseek.com")
    /// Can be customized for OpenAI-compatible endpoints.
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    ///
    /// A hung upstream call fails with `LlmError::Timeout` instead of
    /// blocking the caller indefinitely.
    pub timeout_secs: u64,
}

impl DeepSeekConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `DEEPSEEK_API_KEY`. Optionally reads the base
    /// URL from `DEEPSEEK_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY").map_err(|_| LlmError::MissingCredential)?;

        let api_base =
            std::env::var("DEEPSEEK_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// DeepSeek chat-completion client
///
/// Supports "deepseek-chat" (V3) and "deepseek-reasoner" (R1) models, plus
/// any OpenAI-compatible endpoint through a custom base URL.
pub struct DeepSeekClient {
    client: Client,
    config: DeepSeekConfig,
}

impl DeepSeekClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: DeepSeekConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new client with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(DeepSeekConfig::new(api_key))
    }

    /// Create a client from the `DEEPSEEK_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(DeepSeekConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &DeepSeekConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            e.into()
        }
    }

    /// Issue one non-streaming chat request
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<Completion> {
        debug!("sending chat request to {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::UnexpectedResponse(format!("failed to parse response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::UnexpectedResponse("no choices in response".to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "completion received - tokens: {}/{}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(Completion {
            content: choice.message.content,
            usage: parsed.usage,
        })
    }

    /// Open a streaming chat request
    ///
    /// Returns a lazy, finite sequence of content fragments. Malformed
    /// fragments are skipped; the sequence ends at the `[DONE]` sentinel.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_stream(&self, request: &ChatRequest) -> Result<ChatStream> {
        let mut request = request.clone();
        request.stream = true;

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream { status, body });
        }

        Ok(ChatStream::new(response))
    }
}

#[async_trait]
impl ChatProvider for DeepSeekClient {
    async fn complete(&self, request: ChatRequest) -> Result<Completion> {
        self.chat(&request).await
    }

    fn name(&self) -> &'static str {
        "deepseek"
    }
}

// ============================================================================
// Wire response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
