//! Text generation against a hosted chat-completion API.
//!
//! [`GenerationClient`] is the only network-facing seam in the engine. The
//! production implementation is [`HttpGenerationClient`]; tests substitute
//! stubs. [`generate_within`] puts any client under a hard time budget.

pub mod client;
pub mod estimate;

pub use client::HttpGenerationClient;
pub use estimate::{estimate, CostRates, Estimate};

use crate::types::ToolDescriptor;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single generation attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The call did not finish inside its budget and was abandoned.
    #[error("Generation timed out after {}", fmt_budget(.0))]
    Timeout(Duration),

    /// No bearer key is configured, so no request was sent.
    #[error("AI generation failed: no API key configured")]
    NotConfigured,

    /// The endpoint answered with an error, or the request could not be sent.
    #[error("AI generation failed: {0}")]
    Upstream(String),

    /// The endpoint answered 2xx with a body we could not use.
    #[error("AI generation failed: malformed response: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// Whether re-invoking the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Upstream(_))
    }
}

fn fmt_budget(d: &Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}

/// Anything that can turn a rendered prompt into generated text.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for `prompt` using `tool`'s generation parameters.
    async fn generate(&self, prompt: &str, tool: &ToolDescriptor)
        -> Result<String, GenerationError>;
}

/// Run `client.generate` under a wall-clock budget.
///
/// On expiry the in-flight future is dropped, which aborts any HTTP request
/// it owns, and a [`GenerationError::Timeout`] is returned.
pub async fn generate_within(
    client: &dyn GenerationClient,
    prompt: &str,
    tool: &ToolDescriptor,
    budget: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(budget, client.generate(prompt, tool)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(budget)),
    }
}
