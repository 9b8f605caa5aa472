//! Dispatch façade: the single entry point for running a tool.
//!
//! Registry lookup -> input validation -> prompt building -> generation under
//! a time budget -> cost estimate. Every failure becomes a
//! `GenerationResult { success: false, .. }`; nothing is retried.

use crate::config::EngineConfig;
use crate::inference::{
    estimate, generate_within, CostRates, GenerationClient, HttpGenerationClient,
};
use crate::registry::{CatalogError, ToolRegistry};
use crate::tools::{build_prompt, validate};
use crate::types::*;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default wall-clock budget for one generation call.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(15);

/// Stateless tool dispatcher. Cheap to clone; clones share the registry and client.
#[derive(Clone)]
pub struct ToolEngine {
    registry: Arc<ToolRegistry>,
    client: Arc<dyn GenerationClient>,
    budget: Duration,
    rates: CostRates,
}

impl ToolEngine {
    /// Create an engine over `registry` that generates with `client`.
    pub fn new(registry: ToolRegistry, client: impl GenerationClient + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            client: Arc::new(client),
            budget: DEFAULT_BUDGET,
            rates: CostRates::default(),
        }
    }

    /// Build the production engine: configured catalog and HTTP client.
    pub fn from_config(config: &EngineConfig) -> Result<Self, CatalogError> {
        let registry = match config.resolved_catalog_path() {
            Some(path) => ToolRegistry::load(Path::new(&path))?,
            None => ToolRegistry::builtin()?,
        };
        let client = HttpGenerationClient::from_config(config);
        Ok(Self::new(registry, client)
            .with_budget(config.timeout())
            .with_rates(CostRates {
                input_per_1k: config.input_cost_per_1k,
                output_per_1k: config.output_cost_per_1k,
            }))
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_rates(mut self, rates: CostRates) -> Self {
        self.rates = rates;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Every tool in the catalog.
    pub fn all_tools(&self) -> &[ToolDescriptor] {
        self.registry.all_tools()
    }

    /// Tools in one category; empty for unknown categories.
    pub fn tools_by_category(&self, category: &str) -> Vec<&ToolDescriptor> {
        self.registry.tools_by_category(category)
    }

    /// Run one tool end to end. Never fails; errors land in the result.
    pub async fn process_tool(&self, tool_id: &str, inputs: &Inputs) -> GenerationResult {
        let started = Instant::now();
        let request_id = ulid::Ulid::new();

        let Some(tool) = self.registry.get(tool_id) else {
            warn!("[{}] Unknown tool '{}'", request_id, tool_id);
            return GenerationResult::failed(format!("Tool {} not found", tool_id), 0);
        };

        if let Some(first) = validate(tool, inputs).into_iter().next() {
            warn!("[{}] {} rejected input: {}", request_id, tool_id, first);
            return GenerationResult::failed(first.to_string(), 0);
        }

        let prompt = build_prompt(tool, inputs);
        info!(
            "[{}] Running {} ({} input(s), {} prompt chars)",
            request_id,
            tool_id,
            inputs.len(),
            prompt.len()
        );

        let generated = generate_within(self.client.as_ref(), &prompt, tool, self.budget).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match generated {
            Ok(content) => {
                let est = estimate(&prompt, &content, self.rates);
                info!(
                    "[{}] {} produced {} words in {}ms (est. ${:.5})",
                    request_id, tool_id, est.words_generated, elapsed_ms, est.cost
                );
                GenerationResult::succeeded(
                    content,
                    GenerationMetadata {
                        words_generated: est.words_generated,
                        processing_time_ms: elapsed_ms,
                        cost: est.cost,
                        confidence: SUCCESS_CONFIDENCE,
                    },
                )
            }
            Err(e) => {
                warn!(
                    "[{}] {} failed after {}ms (retryable: {}): {}",
                    request_id,
                    tool_id,
                    elapsed_ms,
                    e.is_retryable(),
                    e
                );
                GenerationResult::failed(e.to_string(), elapsed_ms)
            }
        }
    }

    /// Like [`process_tool`](Self::process_tool), for loosely-typed JSON inputs.
    pub async fn process_json(&self, tool_id: &str, inputs: &serde_json::Value) -> GenerationResult {
        self.process_tool(tool_id, &inputs_from_json(inputs)).await
    }
}

/// Convert a JSON value into string inputs.
///
/// Strings, numbers, and booleans become strings; `null` members are dropped.
/// Arrays and objects are kept as their JSON text. A non-object value yields
/// no inputs at all.
pub fn inputs_from_json(value: &serde_json::Value) -> Inputs {
    use serde_json::Value;

    let Some(map) = value.as_object() else {
        debug!("Non-object inputs treated as empty");
        return Inputs::new();
    };

    map.iter()
        .filter_map(|(k, v)| {
            let s = match v {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((k.clone(), s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_inputs_coerce_scalars_and_drop_nulls() {
        let inputs = inputs_from_json(&json!({
            "topic": "cats",
            "count": 3,
            "draft": true,
            "missing": null,
            "tags": ["a", "b"]
        }));
        assert_eq!(inputs.get("topic").map(String::as_str), Some("cats"));
        assert_eq!(inputs.get("count").map(String::as_str), Some("3"));
        assert_eq!(inputs.get("draft").map(String::as_str), Some("true"));
        assert_eq!(inputs.get("tags").map(String::as_str), Some(r#"["a","b"]"#));
        assert!(!inputs.contains_key("missing"));
    }

    #[test]
    fn non_object_json_is_empty_inputs() {
        assert!(inputs_from_json(&json!(null)).is_empty());
        assert!(inputs_from_json(&json!("topic")).is_empty());
        assert!(inputs_from_json(&json!([1, 2])).is_empty());
    }
}
