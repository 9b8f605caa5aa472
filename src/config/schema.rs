//! Configuration schema for aitools.toml.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the OpenAI-compatible completion API (without `/chat/completions`).
    pub api_base_url: String,

    /// Bearer key for the completion API. Overridden by the environment.
    pub api_key: String,

    /// Model requested for every generation.
    pub model: String,

    /// Wall-clock budget for one generation call, in seconds.
    pub timeout_secs: u64,

    /// Upper bound on `max_tokens` regardless of the tool's own setting.
    pub max_tokens_cap: u32,

    /// Upper bound on `temperature` regardless of the tool's own setting.
    pub temperature_cap: f64,

    /// Nucleus sampling parameter sent with every request.
    pub top_p: f64,

    /// USD per 1000 estimated prompt tokens.
    pub input_cost_per_1k: f64,

    /// USD per 1000 estimated completion tokens.
    pub output_cost_per_1k: f64,

    /// Optional replacement tool catalog (TOML). Empty means the built-in one.
    pub catalog_path: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.deepseek.com/v1".into(),
            api_key: String::new(),
            model: "deepseek-chat".into(),
            timeout_secs: 15,
            max_tokens_cap: 800,
            temperature_cap: 0.01,
            top_p: 0.9,
            input_cost_per_1k: 0.01,
            output_cost_per_1k: 0.03,
            catalog_path: String::new(),
            log_level: "info".into(),
        }
    }
}

impl EngineConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    /// Resolved replacement catalog path, if one is configured.
    pub fn resolved_catalog_path(&self) -> Option<String> {
        if self.catalog_path.trim().is_empty() {
            None
        } else {
            Some(self.resolve_path(&self.catalog_path))
        }
    }

    /// Generation budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a bearer key is available for the completion API.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
