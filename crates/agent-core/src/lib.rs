//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and an explicit
//! tool-descriptor table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Dispatch   │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop alternates between assistant turns (one provider call) and tool
//! turns (one registry dispatch per requested tool) until the provider
//! returns a plain text message. The conversation is append-only and holds
//! the full trace when the loop terminates.

pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, MessageKind, Role, ToolRequest};
pub use provider::{Embedder, GenerationOptions, LlmProvider, ModelInfo};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use session::{MemorySessionStore, Session, SessionId, SessionStore};
pub use tool::{ParameterSchema, Tool, ToolRegistry, ToolResult, ToolSchema};
