//! Ollama Providers
//!
//! Implementations of `LlmProvider` and `Embedder` for local Ollama
//! inference. Tool binding happens here: the descriptor table is rendered
//! into the system prompt on the way out, and tool-call JSON in the reply
//! is lifted into structured requests on the way back, so the dispatch
//! loop only ever sees classified messages.

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role, ToolRequest},
    provider::{Embedder, GenerationOptions, LlmProvider, ModelInfo},
    tool::ToolSchema,
};
use async_trait::async_trait;
use ollama_rs::{
    generation::{
        chat::{request::ChatMessageRequest, ChatMessage, MessageRole},
        embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
    },
    models::ModelOptions as OllamaOptions,
    Ollama,
};

/// Ollama connection configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".into());
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(11434);

        Self { host, port }
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with custom host/port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_config(OllamaConfig {
            host: host.into(),
            port,
        })
    }

    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Self {
        Self {
            client: Ollama::new(&config.host, config.port),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(OllamaConfig::from_env())
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Convert agent messages to Ollama format, binding the tool table
    /// into the system prompt.
    fn convert_messages(messages: &[Message], tools: &[ToolSchema]) -> Vec<ChatMessage> {
        let mut converted: Vec<ChatMessage> = messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    Role::User => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                    Role::Tool => MessageRole::User, // Tool results appear as user context
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect();

        if !tools.is_empty() {
            let tool_section = render_tool_prompt(tools);
            match converted.first_mut() {
                Some(first) if matches!(first.role, MessageRole::System) => {
                    first.content = format!("{}\n\n{}", first.content, tool_section);
                }
                _ => converted.insert(0, ChatMessage::new(MessageRole::System, tool_section)),
            }
        }

        converted
    }

    /// Build Ollama generation options
    fn build_options(opts: &GenerationOptions) -> OllamaOptions {
        OllamaOptions::default()
            .temperature(opts.temperature)
            .top_p(opts.top_p)
            .num_predict(opts.max_tokens as i32)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn respond(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Message> {
        let ollama_messages = Self::convert_messages(messages, tools);
        let ollama_options = Self::build_options(options);

        let request =
            ChatMessageRequest::new(options.model.clone(), ollama_messages).options(ollama_options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let content = response.message.content;
        let requests = parse_tool_requests(&content);

        if requests.is_empty() {
            Ok(Message::assistant(content))
        } else {
            tracing::debug!(count = requests.len(), "Model requested tool invocations");
            Ok(Message::assistant_tool_calls(content, requests))
        }
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.list_local_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(|m| ModelInfo {
                id: m.name.clone(),
                name: m.name,
            })
            .collect())
    }
}

/// Render the tool descriptor table as model-facing instructions
fn render_tool_prompt(tools: &[ToolSchema]) -> String {
    let mut prompt = String::from("## Available Tools\n\n");
    prompt.push_str("You can use the following tools by responding with a JSON block:\n\n");
    prompt.push_str("```tool\n{\"tool\": \"tool_name\", \"arguments\": {\"arg\": \"value\"}}\n```\n\n");

    for schema in tools {
        prompt.push_str(&format!("### {}\n", schema.name));
        prompt.push_str(&format!("{}\n", schema.description));

        if !schema.parameters.is_empty() {
            prompt.push_str("**Parameters:**\n");
            for param in &schema.parameters {
                let required = if param.required { " (required)" } else { "" };
                prompt.push_str(&format!(
                    "- `{}` ({}){}: {}\n",
                    param.name, param.param_type, required, param.description
                ));
            }
        }
        prompt.push('\n');
    }

    prompt
}

/// Lift tool-call JSON out of a model reply.
///
/// Every ```tool fenced block becomes one request; a bare JSON object with
/// a "tool" key is accepted as a fallback for models that skip the fence.
fn parse_tool_requests(content: &str) -> Vec<ToolRequest> {
    const FENCE_START: &str = "```tool";
    const FENCE_END: &str = "```";

    let mut requests = Vec::new();
    let mut rest = content;

    while let Some(start_idx) = rest.find(FENCE_START) {
        let after_marker = &rest[start_idx + FENCE_START.len()..];
        let Some(end_idx) = after_marker.find(FENCE_END) else {
            break;
        };

        let json_str = after_marker[..end_idx].trim();
        match serde_json::from_str::<ToolRequest>(json_str) {
            Ok(request) => requests.push(request),
            Err(e) => tracing::warn!("Ignoring malformed tool block: {}", e),
        }

        rest = &after_marker[end_idx + FENCE_END.len()..];
    }

    if requests.is_empty() {
        if let Some(request) = parse_inline_tool_request(content) {
            requests.push(request);
        }
    }

    requests
}

/// Try to parse an inline JSON tool call
fn parse_inline_tool_request(content: &str) -> Option<ToolRequest> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;

    if end <= start {
        return None;
    }

    serde_json::from_str::<ToolRequest>(&content[start..=end]).ok()
}

/// Ollama embedding backend
pub struct OllamaEmbedder {
    client: Ollama,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(config: &OllamaConfig, model: impl Into<String>) -> Self {
        Self {
            client: Ollama::new(&config.host, config.port),
            model: model.into(),
        }
    }

    /// Create from environment variables (`EMBED_MODEL`, default
    /// `nomic-embed-text`, plus the shared Ollama connection settings)
    pub fn from_env() -> Self {
        let model = std::env::var("EMBED_MODEL").unwrap_or_else(|_| "nomic-embed-text".into());
        Self::new(&OllamaConfig::from_env(), model)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(
            self.model.clone(),
            EmbeddingsInput::Single(text.to_string()),
        );

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("empty embedding response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::tool::ParameterSchema;

    #[test]
    fn test_config_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.host, "http://localhost");
        assert_eq!(config.port, 11434);
    }

    #[test]
    fn test_parse_fenced_tool_block() {
        let content = r#"Let me check that for you.
```tool
{"tool": "guest_info_retriever", "arguments": {"query": "Ada Lovelace"}}
```"#;

        let requests = parse_tool_requests(content);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "guest_info_retriever");
        assert_eq!(requests[0].str_arg("query"), Some("Ada Lovelace"));
        assert!(!requests[0].call_id.is_empty());
    }

    #[test]
    fn test_parse_multiple_tool_blocks() {
        let content = r#"```tool
{"tool": "weather_info", "arguments": {"location": "Paris"}}
```
and also
```tool
{"tool": "web_search", "arguments": {"query": "catering"}}
```"#;

        let requests = parse_tool_requests(content);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "weather_info");
        assert_eq!(requests[1].name, "web_search");
    }

    #[test]
    fn test_parse_inline_fallback() {
        let content = r#"{"tool": "hub_stats", "arguments": {"author": "google"}}"#;

        let requests = parse_tool_requests(content);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "hub_stats");
    }

    #[test]
    fn test_plain_text_has_no_requests() {
        assert!(parse_tool_requests("The party starts at eight.").is_empty());
    }

    #[test]
    fn test_tool_prompt_lists_every_descriptor() {
        let schemas = vec![
            ToolSchema {
                name: "weather_info".into(),
                description: "Dummy weather".into(),
                parameters: vec![ParameterSchema::required_string("location", "Where")],
            },
            ToolSchema {
                name: "hub_stats".into(),
                description: "Hub downloads".into(),
                parameters: vec![],
            },
        ];

        let prompt = render_tool_prompt(&schemas);
        assert!(prompt.contains("### weather_info"));
        assert!(prompt.contains("`location` (string) (required)"));
        assert!(prompt.contains("### hub_stats"));
    }

    #[test]
    fn test_message_conversion_binds_tools() {
        let messages = vec![Message::system("You are helpful."), Message::user("Hello")];
        let schemas = vec![ToolSchema {
            name: "weather_info".into(),
            description: "Dummy weather".into(),
            parameters: vec![],
        }];

        let converted = OllamaProvider::convert_messages(&messages, &schemas);
        assert_eq!(converted.len(), 2);
        assert!(converted[0].content.contains("## Available Tools"));
        assert!(converted[0].content.contains("You are helpful."));
    }

    #[test]
    fn test_message_conversion_without_system_message() {
        let messages = vec![Message::user("Hello")];
        let schemas = vec![ToolSchema {
            name: "weather_info".into(),
            description: "Dummy weather".into(),
            parameters: vec![],
        }];

        let converted = OllamaProvider::convert_messages(&messages, &schemas);
        assert_eq!(converted.len(), 2);
        assert!(matches!(converted[0].role, MessageRole::System));
    }
}
