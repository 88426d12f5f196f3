//! Streamed model output
//!
//! Models emit a sequence of [`ModelChunk`]s. Tool-call requests arrive in
//! whatever shape the backend produces and are normalized through
//! [`RawToolCall::normalize`] before anything downstream sees them.

use futures::Stream;
use serde_json::{Map, Value};
use std::pin::Pin;
use thiserror::Error;

use agora_core::ToolCallRequest;

use crate::provider::LlmError;

/// Stream of chunks produced by a completion model
pub type ModelStream = Pin<Box<dyn Stream<Item = Result<ModelChunk, LlmError>> + Send>>;

/// One piece of streamed output
#[derive(Debug, Clone, PartialEq)]
pub enum ModelChunk {
    /// A text fragment
    Text(String),
    /// A tool-call request, not yet normalized
    ToolCall(RawToolCall),
}

impl ModelChunk {
    /// Text chunk helper
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A tool call whose argument payload may be a map, a JSON-encoded string,
/// or a bare scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToolCall {
    pub id: Option<String>,
    pub name: Option<String>,
    pub args: Value,
}

/// A tool call that cannot be turned into a [`ToolCallRequest`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedToolCall {
    #[error("tool call has no name")]
    MissingName,
    #[error("tool call '{0}' has no id")]
    MissingId(String),
}

impl RawToolCall {
    /// Build a raw call from known parts
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: Value) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            args,
        }
    }

    /// Read a call out of a loosely structured JSON object.
    ///
    /// Accepts both the flat `{"id", "name", "args"}` layout and the nested
    /// `{"id", "function": {"name", "arguments"}}` layout.
    pub fn from_value(value: &Value) -> Self {
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);
        let function = value.get("function");

        let name = value
            .get("name")
            .or_else(|| function.and_then(|f| f.get("name")))
            .and_then(Value::as_str)
            .map(str::to_string);

        let args = value
            .get("args")
            .or_else(|| value.get("arguments"))
            .or_else(|| function.and_then(|f| f.get("arguments")))
            .cloned()
            .unwrap_or(Value::Null);

        Self { id, name, args }
    }

    /// Normalize into the canonical request shape
    pub fn normalize(self) -> Result<ToolCallRequest, MalformedToolCall> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(MalformedToolCall::MissingName),
        };
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(MalformedToolCall::MissingId(name)),
        };

        Ok(ToolCallRequest::new(id, name, normalize_args(self.args)))
    }
}

fn normalize_args(args: Value) -> Map<String, Value> {
    match args {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Map::new();
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Object(map)) => map,
                Ok(Value::String(inner)) => wrap_input(Value::String(inner)),
                Ok(Value::Null) | Err(_) => wrap_input(Value::String(text)),
                Ok(other) => wrap_input(other),
            }
        }
        other => wrap_input(other),
    }
}

fn wrap_input(value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("input".to_string(), value);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_args_pass_through() {
        let call = RawToolCall::new("c1", "search", json!({"query": "tariffs"}))
            .normalize()
            .unwrap();
        assert_eq!(call.args["query"], "tariffs");
        assert_eq!(call.id, "c1");
    }

    #[test]
    fn test_json_string_args_are_parsed() {
        let call = RawToolCall::new("c2", "search", json!("{\"query\": \"wages\"}"))
            .normalize()
            .unwrap();
        assert_eq!(call.args["query"], "wages");
    }

    #[test]
    fn test_scalar_args_are_wrapped() {
        let call = RawToolCall::new("c3", "search", json!("minimum wage"))
            .normalize()
            .unwrap();
        assert_eq!(call.args["input"], "minimum wage");

        let call = RawToolCall::new("c4", "calc", json!(42)).normalize().unwrap();
        assert_eq!(call.args["input"], 42);

        let call = RawToolCall::new("c5", "calc", Value::Null).normalize().unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_nested_function_layout() {
        let raw = RawToolCall::from_value(&json!({
            "id": "call_9",
            "type": "function",
            "function": {"name": "datetime", "arguments": "{\"timezone\": \"utc\"}"}
        }));
        let call = raw.normalize().unwrap();
        assert_eq!(call.name, "datetime");
        assert_eq!(call.args["timezone"], "utc");
    }

    #[test]
    fn test_missing_parts_are_rejected() {
        let raw = RawToolCall::from_value(&json!({"id": "x", "args": {}}));
        assert_eq!(raw.normalize().unwrap_err(), MalformedToolCall::MissingName);

        let raw = RawToolCall::from_value(&json!({"name": "search"}));
        assert_eq!(
            raw.normalize().unwrap_err(),
            MalformedToolCall::MissingId("search".into())
        );
    }
}
