//! Structured error types for tool execution
//!
//! Tool errors never cross the dispatcher boundary: [`crate::ToolDispatcher`]
//! renders every one of them into a result string. Inside the crate they keep
//! enough structure to decide whether a parameter-repair retry is worthwhile.

use thiserror::Error;

/// Error types for tool execution with precise variants for each failure mode.
///
/// # Example
///
/// ```
/// use agora_llm::ToolError;
///
/// let err = ToolError::not_found("unknown_tool", vec!["datetime".into()]);
/// assert!(err.to_string().contains("unknown_tool"));
/// assert!(err.to_string().contains("datetime"));
/// ```
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry
    #[error("Tool '{name}' not found. Available tools: {}", format_available(available))]
    NotFound {
        /// Name of the tool that was requested
        name: String,
        /// Registered tool names
        available: Vec<String>,
    },

    /// Argument values failed validation
    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments {
        /// Name of the tool
        tool: String,
        /// Human-readable reason for validation failure
        reason: String,
    },

    /// The tool does not declare this argument
    #[error("Tool '{tool}' got an unexpected argument '{argument}'")]
    UnexpectedArgument { tool: String, argument: String },

    /// A required argument is absent
    #[error("Tool '{tool}' is missing required argument '{argument}'")]
    MissingArgument { tool: String, argument: String },

    /// The tool only accepts named arguments
    #[error("Tool '{tool}' does not accept a single positional value")]
    PositionalNotSupported { tool: String },

    /// Tool execution failed
    #[error("Execution of '{tool}' failed: {message}")]
    ExecutionFailed {
        /// Name of the tool
        tool: String,
        /// Error message
        message: String,
    },

    /// Tool execution exceeded its own timeout
    #[error("Tool '{tool}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the tool
        tool: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool is disabled or unavailable
    #[error("Tool '{name}' is currently unavailable: {reason}")]
    Unavailable {
        /// Name of the tool
        name: String,
        /// Reason for unavailability
        reason: String,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    }
}

impl ToolError {
    /// Create a NotFound error
    pub fn not_found(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::NotFound {
            name: name.into(),
            available,
        }
    }

    /// Create an InvalidArguments error with context
    pub fn invalid_args(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnexpectedArgument error
    pub fn unexpected_argument(tool: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            tool: tool.into(),
            argument: argument.into(),
        }
    }

    /// Create a MissingArgument error
    pub fn missing_argument(tool: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            tool: tool.into(),
            argument: argument.into(),
        }
    }

    /// Create a PositionalNotSupported error
    pub fn positional_not_supported(tool: impl Into<String>) -> Self {
        Self::PositionalNotSupported { tool: tool.into() }
    }

    /// Create an ExecutionFailed error
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a Timeout error
    pub fn timeout(tool: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            tool: tool.into(),
            timeout_ms,
        }
    }

    /// Create an Unavailable error
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True when the call failed because of the argument shape rather than
    /// inside the tool; these are worth one retry with a reduced argument set.
    pub fn is_parameter_mismatch(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedArgument { .. }
                | Self::MissingArgument { .. }
                | Self::PositionalNotSupported { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_known_tools() {
        let err = ToolError::not_found("search_web", vec!["datetime".into(), "echo".into()]);
        let text = err.to_string();
        assert!(text.contains("search_web"));
        assert!(text.contains("datetime, echo"));

        let err = ToolError::not_found("x", Vec::new());
        assert!(err.to_string().ends_with("none"));
    }

    #[test]
    fn test_invalid_args() {
        let err = ToolError::invalid_args("datetime", "Missing timezone field");
        assert!(err.to_string().contains("datetime"));
        assert!(err.to_string().contains("Missing timezone"));
    }

    #[test]
    fn test_parameter_mismatch_classification() {
        assert!(ToolError::unexpected_argument("search", "index").is_parameter_mismatch());
        assert!(ToolError::missing_argument("search", "query").is_parameter_mismatch());
        assert!(ToolError::positional_not_supported("search").is_parameter_mismatch());
        assert!(!ToolError::execution_failed("search", "boom").is_parameter_mismatch());
        assert!(!ToolError::timeout("search", 1000).is_parameter_mismatch());
        assert!(!ToolError::invalid_args("search", "empty").is_parameter_mismatch());
    }
}
