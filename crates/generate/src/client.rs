//! Chat-completion client for OpenRouter.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model slug.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default value of the `HTTP-Referer` header.
pub const DEFAULT_REFERER: &str = "http://localhost:3000";

/// Something that turns a prompt into completion text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// Connection settings for the completion service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: Option<String>,
    endpoint: String,
    model: String,
    referer: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config with defaults and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the environment.
    ///
    /// `OPENROUTER_API_KEY`, `OPENROUTER_MODEL`, `OPENROUTER_BASE_URL` and
    /// `DECK_SITE_URL`; unset or empty variables keep their defaults.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = var("OPENROUTER_API_KEY");
        if let Some(model) = var("OPENROUTER_MODEL") {
            config.model = model;
        }
        if let Some(endpoint) = var("OPENROUTER_BASE_URL") {
            config.endpoint = endpoint;
        }
        if let Some(referer) = var("DECK_SITE_URL") {
            config.referer = referer;
        }

        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Reply text of the first choice.
fn completion_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(Error::EmptyCompletion)
}

/// HTTP client for the OpenRouter chat-completions API.
///
/// One request per call; no retry and no timeout beyond the transport's.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenRouterClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        log::debug!(
            "requesting completion from {} ({} prompt bytes)",
            self.config.model,
            prompt.len()
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::warn!("completion request failed with {}: {}", status, detail);
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        completion_text(parsed)
    }
}
