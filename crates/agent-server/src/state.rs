//! Application State

use std::sync::Arc;

use agent_core::{LlmProvider, MemorySessionStore, ToolRegistry};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    /// Tool registry with all available tools
    pub tools: Arc<ToolRegistry>,

    /// One session object per UI conversation
    pub sessions: Arc<MemorySessionStore>,

    /// Model used when a request does not name one
    pub default_model: String,
}
