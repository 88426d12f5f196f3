//! Tool dispatch with argument repair
//!
//! [`ToolDispatcher`] is the boundary between model-requested tool calls and
//! the registry. Whatever happens inside, `execute` returns a string:
//! results are rendered as text and failures become `Error...` strings.
//!
//! Dispatch order for one call:
//! 1. Look the tool up by name
//! 2. Filter arguments against the tool's declared parameters
//! 3. With a single clean argument, try it as a bare value first
//! 4. On a parameter mismatch, retry once with the essential arguments only

use serde_json::{Map, Value};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use agora_core::ToolCallRequest;

use crate::tool::{Tool, ToolInput, ToolRegistry};
use crate::tool_args::ArgumentFilter;
use crate::tool_error::ToolError;

/// Executes tool calls against an explicitly provided registry.
///
/// # Example
///
/// ```
/// use agora_core::ToolCallRequest;
/// use agora_llm::{tools::builtin_registry, ToolDispatcher};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let dispatcher = ToolDispatcher::new(builtin_registry());
/// let call = ToolCallRequest::new("call_1", "missing", Default::default());
/// let result = dispatcher.execute(&call).await;
/// assert!(result.starts_with("Error"));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
    filter: ArgumentFilter,
}

impl ToolDispatcher {
    /// Create a dispatcher over the given registry
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            filter: ArgumentFilter::new(),
        }
    }

    /// The registry this dispatcher resolves names against
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one tool call and render the outcome as a string.
    ///
    /// Never fails: unknown tools, argument mismatches and tool errors all
    /// come back as strings starting with `Error`.
    pub async fn execute(&self, call: &ToolCallRequest) -> String {
        match self.try_execute(call).await {
            Ok(output) => render_output(output),
            Err(err @ ToolError::NotFound { .. }) => format!("Error: {}", err),
            Err(err) => {
                let mut message = format!("Error executing tool '{}': {}", call.name, err);
                let filtered = self.filter.problematic_keys(&call.args);
                if !filtered.is_empty() {
                    message.push_str(&format!(" (Filtered: {})", filtered.join(", ")));
                }
                message
            }
        }
    }

    async fn try_execute(&self, call: &ToolCallRequest) -> Result<Value, ToolError> {
        let name = call.name.as_str();
        let tool = self.registry.get(name).ok_or_else(|| {
            warn!(tool = name, "Tool not found");
            ToolError::not_found(
                name,
                self.registry.names().into_iter().map(str::to_string).collect(),
            )
        })?;

        if !tool.is_available() {
            warn!(tool = name, "Tool is unavailable");
            return Err(ToolError::unavailable(name, "Tool is currently disabled"));
        }

        let expected = tool.definition().parameter_names();
        let clean = self.filter.filter(&call.args, expected.as_deref());

        let dropped = self.filter.problematic_keys(&call.args);
        if !dropped.is_empty() {
            debug!(tool = name, dropped = ?dropped, "Filtered bookkeeping arguments");
        }

        match self.invoke(tool.as_ref(), clean).await {
            Err(err) if err.is_parameter_mismatch() => {
                let essentials = self.filter.essentials(&call.args, expected.as_deref());
                warn!(
                    tool = name,
                    error = %err,
                    retry_keys = ?essentials.keys().collect::<Vec<_>>(),
                    "Parameter mismatch, retrying with essential arguments"
                );
                self.invoke(tool.as_ref(), essentials).await
            }
            other => other,
        }
    }

    /// One attempt with a given argument set: bare value first when only one
    /// argument remains, then the keyword mapping.
    async fn invoke(&self, tool: &dyn Tool, args: Map<String, Value>) -> Result<Value, ToolError> {
        if args.len() == 1 {
            if let Some(value) = args.values().next().cloned() {
                match self.call(tool, ToolInput::Bare(value)).await {
                    Err(err) if err.is_parameter_mismatch() => {
                        debug!(tool = tool.definition().name, "Bare value rejected, using named arguments");
                    }
                    other => return other,
                }
            }
        }

        self.call(tool, ToolInput::Named(args)).await
    }

    async fn call(&self, tool: &dyn Tool, input: ToolInput) -> Result<Value, ToolError> {
        let name = tool.definition().name;
        tool.validate(&input)?;

        let start = Instant::now();
        let output = match tool.timeout() {
            Some(limit) => timeout(limit, tool.execute(input))
                .await
                .map_err(|_| {
                    warn!(tool = name, timeout_ms = limit.as_millis() as u64, "Tool execution timed out");
                    ToolError::timeout(name, limit.as_millis() as u64)
                })??,
            None => tool.execute(input).await?,
        };

        info!(
            tool = name,
            execution_ms = start.elapsed().as_millis() as u64,
            "Tool executed successfully"
        );
        Ok(output)
    }
}

fn render_output(output: Value) -> String {
    match output {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
