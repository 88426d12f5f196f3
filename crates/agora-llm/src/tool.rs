//! Tool definitions and the registry the dispatcher looks tools up in
//!
//! This module provides:
//! - [`ToolDefinition`] - Metadata describing a tool's interface
//! - [`ToolInput`] - The two shapes a tool can be invoked with
//! - [`Tool`] trait - The core interface all tools must implement
//! - [`ToolRegistry`] - Explicitly constructed name-keyed tool set

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::tool_error::ToolError;

/// Definition of a tool that can be called by a model.
///
/// Holds the tool's name, description and JSON Schema for parameters. The
/// schema's `properties` keys are the tool's declared argument names.
///
/// # Example
/// ```
/// use agora_llm::ToolDefinition;
///
/// const SEARCH_TOOL: ToolDefinition = ToolDefinition {
///     name: "web_search",
///     description: "Search the web for information",
///     parameters: r#"{"type": "object", "properties": {"query": {"type": "string"}}}"#,
/// };
/// assert_eq!(SEARCH_TOOL.parameter_names(), Some(vec!["query".to_string()]));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Name of the tool (used in function calling)
    /// Must be unique within a registry
    pub name: &'static str,
    /// Human-readable description of what the tool does
    pub description: &'static str,
    /// JSON Schema for the tool's parameters
    pub parameters: &'static str,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub const fn new(
        name: &'static str,
        description: &'static str,
        parameters: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            parameters,
        }
    }

    /// Parsed parameter schema (empty object when unparseable)
    pub fn schema(&self) -> Value {
        serde_json::from_str::<Value>(self.parameters).unwrap_or(serde_json::json!({}))
    }

    /// Declared argument names in schema order.
    ///
    /// `None` means the tool declares no parameter schema at all, which is
    /// different from declaring an empty one.
    pub fn parameter_names(&self) -> Option<Vec<String>> {
        match self.schema().get("properties") {
            Some(Value::Object(properties)) => Some(properties.keys().cloned().collect()),
            _ => None,
        }
    }

    /// Required argument names
    pub fn required_parameters(&self) -> Vec<String> {
        self.schema()
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Convert to OpenAI-compatible tool format
    pub fn to_openai_format(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.schema()
            }
        })
    }
}

/// Arguments handed to a tool.
///
/// Many tools take a single value, so the dispatcher first tries a
/// [`ToolInput::Bare`] call when only one clean argument is left, then falls
/// back to [`ToolInput::Named`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    /// A single positional value
    Bare(Value),
    /// Keyword arguments
    Named(Map<String, Value>),
}

impl ToolInput {
    /// Look up a named argument (always `None` for bare input)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Bare(_) => None,
            Self::Named(args) => args.get(key),
        }
    }

    /// Named arguments as a string, if present
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The bare value, if this is positional input
    pub fn bare(&self) -> Option<&Value> {
        match self {
            Self::Bare(value) => Some(value),
            Self::Named(_) => None,
        }
    }

    /// Reject any key not in `allowed`
    pub fn ensure_only(&self, tool: &str, allowed: &[&str]) -> Result<(), ToolError> {
        if let Self::Named(args) = self {
            if let Some(extra) = args.keys().find(|k| !allowed.contains(&k.as_str())) {
                return Err(ToolError::unexpected_argument(tool, extra.as_str()));
            }
        }
        Ok(())
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        match self {
            Self::Bare(_) => 1,
            Self::Named(args) => args.len(),
        }
    }

    /// True for an empty named mapping
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Map<String, Value>> for ToolInput {
    fn from(args: Map<String, Value>) -> Self {
        Self::Named(args)
    }
}

/// The core Tool trait.
///
/// `validate()` is called before `execute()`; shape problems should be
/// reported with the parameter-mismatch variants of [`ToolError`] so the
/// dispatcher can repair the call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's metadata (name, description, schema)
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with the given input
    async fn execute(&self, input: ToolInput) -> Result<Value, ToolError>;

    /// Validate arguments before execution.
    ///
    /// # Default
    ///
    /// Returns `Ok(())` - no additional validation.
    fn validate(&self, _input: &ToolInput) -> Result<(), ToolError> {
        Ok(())
    }

    /// Execution timeout.
    ///
    /// # Default
    ///
    /// `None`: the call runs until it returns.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Whether the tool is currently available.
    fn is_available(&self) -> bool {
        true
    }
}

/// Registry for explicitly registered tools.
///
/// Built by the caller and handed to the dispatcher; there is no
/// process-wide registry. Duplicate names are rejected.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// # Returns
    ///
    /// `true` if the tool was added, `false` if a tool with that name already exists.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let name = tool.definition().name.to_string();
        if self.tools.contains_key(&name) {
            tracing::warn!("Tool '{}' already registered, skipping duplicate", name);
            return false;
        }
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Definitions of available tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .filter(|t| t.is_available())
            .map(|t| t.definition().clone())
            .collect();
        definitions.sort_by_key(|d| d.name);
        definitions
    }

    /// Generate OpenAI-compatible tool list
    pub fn to_openai_format(&self) -> Vec<Value> {
        self.definitions()
            .iter()
            .map(ToolDefinition::to_openai_format)
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
