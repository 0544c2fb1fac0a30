//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for all LLM providers (Ollama, OpenAI,
//! Anthropic, etc.) allowing the agent to work with any backend without
//! code changes. The provider receives the tool descriptor table alongside
//! the conversation so it can bind tools however its protocol requires,
//! and returns a fully classified [`Message`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::tool::ToolSchema;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "qwen2.5-coder:7b", "llama3.2")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_top_p() -> f32 {
    0.9
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "qwen2.5-coder:7b".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Produce the next assistant message for a conversation.
    ///
    /// `tools` is the descriptor table the model may draw on; when the
    /// reply requests invocations the returned message carries structured
    /// [`crate::message::ToolRequest`]s, otherwise it is plain text.
    async fn respond(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Message>;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}

/// Strategy trait for text embedding backends.
///
/// A fixed pretrained embedding function: the same input must always map
/// to the same vector for the lifetime of the process.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text into a fixed-length vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
