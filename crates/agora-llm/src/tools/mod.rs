//! Built-in tools
//!
//! - [`DateTimeTool`] - Current date and time, so speakers can date-stamp claims
//!
//! Built-in tools are pure computation; network-backed research tools are
//! registered by the embedding application.

mod datetime;

pub use datetime::DateTimeTool;

use std::sync::Arc;

use crate::tool::ToolRegistry;

/// Create a registry with all built-in tools pre-registered
///
/// # Example
///
/// ```
/// let registry = agora_llm::tools::builtin_registry();
/// assert!(registry.contains("datetime"));
/// ```
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DateTimeTool::new()));
    registry
}
