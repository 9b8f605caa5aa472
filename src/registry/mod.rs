//! Tool registry: the immutable catalog of tool descriptors.
//!
//! The built-in catalog ships inside the binary as TOML. A replacement catalog
//! with the same shape can be loaded from disk. Either way the catalog is
//! checked once at construction and never mutated afterwards.

use crate::tools::placeholders;
use crate::types::{FieldKind, ToolCategory, ToolDescriptor};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// The catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../catalog/tools.toml");

/// Reasons a catalog is refused.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate tool id '{0}'")]
    DuplicateTool(String),

    #[error("tool '{tool}' declares input '{field}' more than once")]
    DuplicateField { tool: String, field: String },

    #[error("tool '{tool}' input '{field}' is a select with no options")]
    EmptySelect { tool: String, field: String },

    #[error("tool '{tool}' template references undeclared input '{placeholder}'")]
    UndeclaredPlaceholder { tool: String, placeholder: String },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
}

/// Read-only catalog of tools, looked up by exact id.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Build a registry from descriptors, rejecting inconsistent catalogs.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.id.as_str()) {
                return Err(CatalogError::DuplicateTool(tool.id.clone()));
            }
            check_tool(tool)?;
        }
        debug!("Tool registry built with {} tools", tools.len());
        Ok(Self { tools })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Parse a TOML catalog (`[[tools]]` tables).
    pub fn from_toml(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.tools)
    }

    /// Load a TOML catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_toml(&contents)?;
        info!("Loaded {} tools from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Every tool, in catalog order.
    pub fn all_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Tools in the named category. Unknown categories yield an empty list.
    pub fn tools_by_category(&self, category: &str) -> Vec<&ToolDescriptor> {
        match category.parse::<ToolCategory>() {
            Ok(c) => self.tools.iter().filter(|t| t.category == c).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Find a tool by exact id.
    pub fn get(&self, id: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn check_tool(tool: &ToolDescriptor) -> Result<(), CatalogError> {
    let mut fields = HashSet::new();
    for field in &tool.inputs {
        if !fields.insert(field.id.as_str()) {
            return Err(CatalogError::DuplicateField {
                tool: tool.id.clone(),
                field: field.id.clone(),
            });
        }
        if field.kind == FieldKind::Select && field.options.is_empty() {
            return Err(CatalogError::EmptySelect {
                tool: tool.id.clone(),
                field: field.id.clone(),
            });
        }
    }

    if let Some(name) = placeholders(&tool.prompt_template)
        .into_iter()
        .find(|name| !fields.contains(name))
    {
        return Err(CatalogError::UndeclaredPlaceholder {
            tool: tool.id.clone(),
            placeholder: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
[[tools]]
id = "one"
name = "One"
description = "first"
category = "content"
icon = "1"
max_tokens = 100
temperature = 0.5
prompt_template = "About {topic}"

[[tools.inputs]]
id = "topic"
label = "Topic"
type = "text"
required = true

[[tools]]
id = "two"
name = "Two"
description = "second"
category = "business"
icon = "2"
max_tokens = 100
temperature = 0.5
prompt_template = "No inputs"
"#;

    #[test]
    fn builtin_catalog_loads_all_twenty_tools() {
        let reg = ToolRegistry::builtin().unwrap();
        assert_eq!(reg.len(), 20);
        for c in ToolCategory::ALL {
            assert_eq!(reg.tools_by_category(c.as_str()).len(), 5, "category {}", c);
        }
    }

    #[test]
    fn builtin_ids_are_unique() {
        let reg = ToolRegistry::builtin().unwrap();
        let ids: HashSet<&str> = reg.ids().into_iter().collect();
        assert_eq!(ids.len(), reg.len());
    }

    #[test]
    fn builtin_blog_post_generator_requires_topic() {
        let reg = ToolRegistry::builtin().unwrap();
        let tool = reg.get("blog-post-generator").unwrap();
        let topic = tool.field("topic").unwrap();
        assert!(topic.required);
        assert_eq!(topic.max_length, Some(200));
        assert_eq!(tool.field("tone").unwrap().kind, FieldKind::Select);
    }

    #[test]
    fn lookup_is_exact() {
        let reg = ToolRegistry::from_toml(SMALL).unwrap();
        assert!(reg.get("one").is_some());
        assert!(reg.get("ONE").is_none());
        assert!(reg.get("on").is_none());
    }

    #[test]
    fn unknown_category_is_empty() {
        let reg = ToolRegistry::from_toml(SMALL).unwrap();
        assert!(reg.tools_by_category("marketing").is_empty());
        assert_eq!(reg.tools_by_category("business")[0].id, "two");
    }

    #[test]
    fn rejects_duplicate_tool_ids() {
        let doubled = format!("{}\n{}", SMALL, SMALL.replace("\"two\"", "\"three\""));
        match ToolRegistry::from_toml(&doubled) {
            Err(CatalogError::DuplicateTool(id)) => assert_eq!(id, "one"),
            other => panic!("expected duplicate tool error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_undeclared_placeholder() {
        let bad = SMALL.replace("About {topic}", "About {topic} for {audience}");
        match ToolRegistry::from_toml(&bad) {
            Err(CatalogError::UndeclaredPlaceholder { tool, placeholder }) => {
                assert_eq!(tool, "one");
                assert_eq!(placeholder, "audience");
            }
            other => panic!("expected placeholder error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_select_without_options() {
        let bad = SMALL.replace("type = \"text\"", "type = \"select\"");
        assert!(matches!(
            ToolRegistry::from_toml(&bad),
            Err(CatalogError::EmptySelect { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_input_ids() {
        let bad = SMALL.replace(
            "required = true\n",
            "required = true\n\n[[tools.inputs]]\nid = \"topic\"\nlabel = \"Again\"\ntype = \"text\"\nrequired = false\n",
        );
        match ToolRegistry::from_toml(&bad) {
            Err(CatalogError::DuplicateField { tool, field }) => {
                assert_eq!(tool, "one");
                assert_eq!(field, "topic");
            }
            other => panic!("expected duplicate field error, got {:?}", other),
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ToolRegistry::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tools.toml");
        std::fs::write(&path, SMALL).unwrap();
        assert_eq!(ToolRegistry::load(&path).unwrap().ids(), vec!["one", "two"]);
    }
}
