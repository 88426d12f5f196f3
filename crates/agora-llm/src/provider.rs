//! Model completion boundary and common types

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use agora_core::Message;

use crate::chunk::{ModelChunk, ModelStream};
use crate::tool::ToolDefinition;

/// Errors from model creation and invocation
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing credentials for '{model}': set {env_var}")]
    MissingCredentials { model: String, env_var: String },
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    #[error("No backend available for provider '{0}'")]
    NotAvailable(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Rate limited")]
    RateLimited,
}

impl LlmError {
    /// Configuration problems surface at model-creation time and never mid-stream
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials { .. } | Self::UnknownModel(_) | Self::NotAvailable(_)
        )
    }
}

/// A request to a completion model
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Ordered conversation context
    pub messages: Vec<Message>,
    /// Tools the model may call (empty = no tool binding)
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request over the given messages with no tools bound
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
            temperature: 0.7,
        }
    }

    /// Bind a tool set
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Override the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Concatenated content of every message, used by prompt-driven mocks
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Non-streaming response
#[derive(Debug, Clone, Serialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,
    /// Model used
    pub model: String,
    /// Time taken in milliseconds
    pub latency_ms: u64,
}

/// A model that can stream a completion.
///
/// `stream` yields text fragments and tool-call requests in arrival order.
/// Transport failures after the stream has started arrive as `Err` items.
#[async_trait]
pub trait CompletionModel: Send + Sync + std::fmt::Debug {
    /// Model name
    fn name(&self) -> &str;

    /// Start a streaming completion
    async fn stream(&self, request: CompletionRequest) -> Result<ModelStream, LlmError>;

    /// Invoke once and collect the text (tool calls are dropped)
    async fn invoke(&self, request: CompletionRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        let mut stream = self.stream(request).await?;
        let mut content = String::new();

        while let Some(chunk) = stream.next().await {
            if let ModelChunk::Text(text) = chunk? {
                content.push_str(&text);
            }
        }

        Ok(LlmResponse {
            content,
            model: self.name().to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Creates models by name.
///
/// Creation is where configuration errors (missing credentials, unknown
/// model) are reported, so callers can tell them apart from transport errors.
pub trait ModelProvider: Send + Sync {
    /// Build (or look up) a ready model
    fn create(&self, model: &str) -> Result<Arc<dyn CompletionModel>, LlmError>;
}

/// A single shared model answers for every name
impl<M: CompletionModel + 'static> ModelProvider for Arc<M> {
    fn create(&self, _model: &str) -> Result<Arc<dyn CompletionModel>, LlmError> {
        Ok(self.clone() as Arc<dyn CompletionModel>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_distinguishable() {
        let missing = LlmError::MissingCredentials {
            model: "openai-gpt4o".into(),
            env_var: "OPENAI_API_KEY".into(),
        };
        assert!(missing.is_configuration());
        assert!(missing.to_string().contains("OPENAI_API_KEY"));
        assert!(!LlmError::StreamInterrupted("reset".into()).is_configuration());
        assert!(!LlmError::RateLimited.is_configuration());
    }

    #[test]
    fn test_prompt_text_joins_messages() {
        let request = CompletionRequest::new(vec![Message::human("a"), Message::human("b")]);
        assert_eq!(request.prompt_text(), "a\n\nb");
        assert!(request.tools.is_empty());
    }
}
