//! # Agora LLM
//!
//! The model-completion boundary and tool dispatch for Agora contests.
//!
//! ## Components
//!
//! | Item | Role |
//! |------|------|
//! | [`CompletionModel`] | Streams text and tool-call chunks for a request |
//! | [`ModelCatalog`] | Named model table, credential checks, backend registry |
//! | [`MockModel`] | Scripted or prompt-driven offline model |
//! | [`ToolRegistry`] | Explicitly constructed name → tool set |
//! | [`ToolDispatcher`] | Filters arguments, invokes tools, always returns a string |
//!
//! ## Quick Start
//!
//! ```rust
//! use agora_core::Message;
//! use agora_llm::{CompletionModel, CompletionRequest, MockModel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let model = MockModel::constant("Opening statement.");
//!     let request = CompletionRequest::new(vec![Message::human("Debate: tariffs")]);
//!
//!     let response = model.invoke(request).await.unwrap();
//!     assert_eq!(response.content, "Opening statement.");
//! }
//! ```
//!
//! ## Plugging in a backend
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agora_llm::{ModelCatalog, ModelProvider};
//!
//! let mut catalog = ModelCatalog::new();
//! catalog.register_backend("openai", Arc::new(|spec| my_client::build(spec)));
//! let model = catalog.create("openai-gpt4o")?; // MissingCredentials without OPENAI_API_KEY
//! ```

pub mod chunk;
pub mod config;
pub mod mock;
pub mod provider;
pub mod tool;
pub mod tool_args;
pub mod tool_error;
pub mod tool_executor;
pub mod tools;

pub use chunk::{MalformedToolCall, ModelChunk, ModelStream, RawToolCall};
pub use config::{
    AgoraConfig, BackendFactory, ConfigError, ModelAvailability, ModelCatalog, ModelSpec,
    MOCK_PROVIDER,
};
pub use mock::{MockFailure, MockModel, MockStep};
pub use provider::{CompletionModel, CompletionRequest, LlmError, LlmResponse, ModelProvider};
pub use tool::{Tool, ToolDefinition, ToolInput, ToolRegistry};
pub use tool_args::ArgumentFilter;
pub use tool_error::ToolError;
pub use tool_executor::ToolDispatcher;
pub use tools::DateTimeTool;
