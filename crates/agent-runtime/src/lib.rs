//! # agent-runtime
//!
//! Runtime providers for the party-agent system.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference and embeddings via Ollama
//! - **OpenAI** (coming soon): OpenAI API integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ollama::OllamaProvider;
//!
//! let provider = OllamaProvider::from_env();
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaEmbedder, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, Embedder, LlmProvider, Message, Result, Role, Session, Tool, ToolRegistry,
};
