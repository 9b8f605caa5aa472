//! OpenAI-compatible chat-completion client.
//!
//! Every request carries a fixed system message naming the current date, the
//! rendered prompt as the user turn, and generation parameters clamped to the
//! configured caps.

use super::{GenerationClient, GenerationError};
use crate::config::EngineConfig;
use crate::types::*;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Probe responses slower than this are reported as `Slow`.
const PROBE_SLOW_AFTER: Duration = Duration::from_secs(10);

/// Chat-completion client for the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    base_url: String,
    api_key: String,
    model: String,
    top_p: f64,
    max_tokens_cap: u32,
    temperature_cap: f64,
    timeout: Duration,
    system_prompt: String,
    http: reqwest::Client,
}

// -- OpenAI-compatible request/response types --------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f64,
    pub(crate) top_p: f64,
    pub(crate) stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The fixed system instruction, anchored to `today` so the model does not
/// fall back on a stale year.
pub fn system_prompt(today: NaiveDate) -> String {
    format!(
        "You are a professional content specialist. Today's date is {} and the current year \
         is {}; use them for any time-sensitive references. Create high-quality, professional \
         content that delivers real business value.",
        today.format("%B %-d, %Y"),
        today.year(),
    )
}

impl HttpGenerationClient {
    /// Create a client with default limits for the given endpoint.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let config = EngineConfig {
            api_base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            ..EngineConfig::default()
        };
        Self::from_config(&config)
    }

    /// Create a client from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        if !config.has_api_key() {
            warn!("No API key configured; generation requests will fail");
        }
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            top_p: config.top_p,
            max_tokens_cap: config.max_tokens_cap,
            temperature_cap: config.temperature_cap,
            timeout: config.timeout(),
            system_prompt: system_prompt(Local::now().date_naive()),
            http: reqwest::Client::new(),
        }
    }

    /// The system instruction sent with every request.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Request body for `prompt` under `tool`'s parameters, clamped to the caps.
    pub(crate) fn request_for<'a>(&'a self, prompt: &str, tool: &ToolDescriptor) -> ChatRequest<'a> {
        self.request(
            prompt,
            tool.max_tokens.min(self.max_tokens_cap),
            tool.temperature.min(self.temperature_cap),
        )
    }

    fn request(&self, prompt: &str, max_tokens: u32, temperature: f64) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.to_string(),
                },
            ],
            max_tokens,
            temperature,
            top_p: self.top_p,
            stream: false,
        }
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            "Generation request to model {} (max_tokens={}, temperature={})",
            request.model, request.max_tokens, request.temperature
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.error.message,
                Err(_) => format!("{} - {}", status, body.trim()),
            };
            return Err(GenerationError::Upstream(message));
        }

        let body: ChatResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Malformed(e.to_string())
            }
        })?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("response has no choices".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Upstream(e.to_string())
        }
    }

    /// Send a tiny request and classify the endpoint by how it answers.
    pub async fn probe(&self) -> ServiceStatus {
        let started = Instant::now();
        match self.complete(&self.request("Test", 10, 0.1)).await {
            Ok(_) if started.elapsed() < PROBE_SLOW_AFTER => ServiceStatus::Available,
            Ok(_) => ServiceStatus::Slow,
            Err(e) => {
                debug!("Probe failed: {}", e);
                ServiceStatus::Unavailable
            }
        }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        tool: &ToolDescriptor,
    ) -> Result<String, GenerationError> {
        self.complete(&self.request_for(prompt, tool)).await
    }
}
