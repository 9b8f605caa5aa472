//! Shared types used across the tools engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Caller-supplied input values keyed by input field id.
pub type Inputs = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Tool catalog
// ---------------------------------------------------------------------------

/// Catalog grouping used for listing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Content,
    Business,
    Creative,
    Communication,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 4] = [
        Self::Content,
        Self::Business,
        Self::Creative,
        Self::Communication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Communication => "communication",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// How an input field is rendered and, for `Select`/`Number`, checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Number,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Textarea => write!(f, "textarea"),
            Self::Select => write!(f, "select"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// One declared input of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Form key, also the placeholder name in the prompt template.
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    /// Permitted values for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Static definition of one content-generation capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: ToolCategory,
    #[serde(default)]
    pub inputs: Vec<InputField>,
    pub prompt_template: String,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl ToolDescriptor {
    /// Look up a declared input by id.
    pub fn field(&self, id: &str) -> Option<&InputField> {
        self.inputs.iter().find(|f| f.id == id)
    }
}

// ---------------------------------------------------------------------------
// Generation results
// ---------------------------------------------------------------------------

/// Confidence reported for any successful generation.
pub const SUCCESS_CONFIDENCE: f64 = 0.95;

/// Metadata attached to every generation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub words_generated: usize,
    pub processing_time_ms: u64,
    /// Estimated USD cost; display only.
    pub cost: f64,
    pub confidence: f64,
}

/// Uniform success/failure envelope returned by the dispatch façade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub content: String,
    pub metadata: GenerationMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(content: String, metadata: GenerationMetadata) -> Self {
        Self {
            success: true,
            content,
            metadata,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            success: false,
            content: String::new(),
            metadata: GenerationMetadata {
                processing_time_ms,
                ..GenerationMetadata::default()
            },
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Inference types
// ---------------------------------------------------------------------------

/// A chat message sent to the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// Reachability of the generation endpoint, as seen by a probe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Available,
    Slow,
    Unavailable,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Slow => write!(f, "slow"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}
