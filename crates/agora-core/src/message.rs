//! Transcript messages
//!
//! A transcript is an append-only list of [`Message`] values: the human seed,
//! assistant turns (optionally carrying tool-call requests) and tool results
//! tagged with the id of the call that produced them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::Side;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Seed prompt or injected context
    Human,
    /// Model output for one side
    Assistant,
    /// Result of a tool invocation
    Tool,
}

/// A tool invocation requested by a model, normalized to one shape.
///
/// Arguments are loosely typed: models routinely add keys the tool never
/// declared, so filtering happens later in the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Provider-assigned call identifier, echoed on the tool result
    pub id: String,
    /// Registered tool name
    pub name: String,
    /// Raw argument mapping as emitted by the model
    pub args: Map<String, Value>,
}

impl ToolCallRequest {
    /// Create a request from its parts
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

/// One entry in the conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author role
    pub role: Role,
    /// Text content (may be empty for tool-call-only assistant messages)
    pub content: String,
    /// Side that produced an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Side>,
    /// Tool calls requested alongside this assistant message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// For tool results: the id of the originating call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// A human/system message (seed prompt or persona context)
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            speaker: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// A finalized assistant message for one side
    pub fn assistant(speaker: Side, content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            speaker: Some(speaker),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant message that requested tools
    pub fn assistant_with_tools(
        speaker: Side,
        content: impl Into<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            tool_calls,
            ..Self::assistant(speaker, content)
        }
    }

    /// A tool result tagged with the originating call id
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            speaker: None,
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// True for assistant messages that carry tool-call requests
    pub fn requests_tools(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty()
    }
}
