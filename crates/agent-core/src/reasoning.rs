//! Dispatch Loop
//!
//! Drives the turn-taking protocol between the LLM provider and the tool
//! registry: assistant turn, then one tool turn per batch of requested
//! invocations, until the provider returns a plain-text answer.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message, MessageKind, ToolRequest};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt used by [`Agent::ask`]
    pub system_prompt: String,

    /// Hard cap on assistant turns; exceeding it is a terminal error
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

Use the available tools when a question needs external information.
After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate."#;

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(provider, tools, AgentConfig::default())
    }

    /// Run the loop on an existing conversation until a final answer.
    ///
    /// The conversation must be non-empty (normally system + user). Every
    /// intermediate assistant and tool message is appended in order, so on
    /// return the conversation holds the full reasoning trace and the
    /// returned string equals the content of its last message.
    pub async fn invoke(&self, conversation: &mut Conversation) -> Result<String> {
        if conversation.is_empty() {
            return Err(AgentError::Config(
                "Cannot invoke on an empty conversation".into(),
            ));
        }

        let schemas = self.tools.schemas();

        for _ in 0..self.config.max_iterations {
            let reply = self
                .provider
                .respond(conversation.messages(), &schemas, &self.config.generation)
                .await?;
            conversation.push(reply.clone());

            match reply.kind {
                MessageKind::ToolCall { ref requests } => {
                    // Tool turn: dispatch every request in issue order and
                    // append one result message per request.
                    for request in requests {
                        let result = self.run_tool(request).await;
                        conversation.push(Message::tool_result(
                            request,
                            format_tool_result(&result),
                        ));
                    }
                }
                _ => return Ok(reply.content),
            }
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Run with a simple string input (creates a temporary conversation)
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut conversation = Conversation::with_system_prompt(&self.config.system_prompt);
        conversation.push(Message::user(question));
        self.invoke(&mut conversation).await
    }

    /// Dispatch one tool request; failures become failure results rather
    /// than loop errors, so the model can react on its next turn.
    async fn run_tool(&self, request: &ToolRequest) -> ToolResult {
        tracing::debug!(tool = %request.name, call_id = %request.call_id, "Executing tool");

        match self.tools.execute(request).await {
            Ok(result) => result,
            Err(e) => ToolResult::failure(request.name.clone(), format!("Error: {}", e)),
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Format a tool outcome for the conversation
fn format_tool_result(result: &ToolResult) -> String {
    if result.success {
        format!("[Tool '{}' returned]\n{}", result.name, result.output)
    } else {
        format!("[Tool '{}' failed]\n{}", result.name, result.output)
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
