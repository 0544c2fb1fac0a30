//! Conversation Messages
//!
//! Standard message format used across the agent system. Every message
//! carries an explicit [`MessageKind`] discriminant set at construction,
//! so downstream code never has to probe optional fields to figure out
//! what a message is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a message sender
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt/instructions
    System,
    /// User input
    User,
    /// Assistant (LLM) response
    Assistant,
    /// Tool result (injected as context)
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A structured tool-invocation request emitted by the model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Tool identifier
    #[serde(rename = "tool")]
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Correlation id, generated when the model does not supply one
    #[serde(default = "new_call_id")]
    pub call_id: String,
}

fn new_call_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ToolRequest {
    pub fn new(name: impl Into<String>, arguments: HashMap<String, serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
            call_id: new_call_id(),
        }
    }

    /// Look up a string argument
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

/// What a message *is*, decided when it is constructed
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text; a final answer when the role is assistant
    Text,

    /// Assistant turn requesting one or more tool invocations
    ToolCall { requests: Vec<ToolRequest> },

    /// Outcome of one tool invocation, correlated to its request
    ToolResult { tool: String, call_id: String },
}

/// A single message in a conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,

    /// Explicit discriminant
    pub kind: MessageKind,

    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            role,
            content: content.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content, MessageKind::Text)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, MessageKind::Text)
    }

    /// Create a plain assistant message (a final answer)
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, MessageKind::Text)
    }

    /// Create an assistant message carrying tool-invocation requests
    pub fn assistant_tool_calls(content: impl Into<String>, requests: Vec<ToolRequest>) -> Self {
        Self::new(
            Role::Assistant,
            content,
            MessageKind::ToolCall { requests },
        )
    }

    /// Create a tool-result message from the request it answers, so the
    /// correlation id always references a prior request
    pub fn tool_result(request: &ToolRequest, content: impl Into<String>) -> Self {
        Self::new(
            Role::Tool,
            content,
            MessageKind::ToolResult {
                tool: request.name.clone(),
                call_id: request.call_id.clone(),
            },
        )
    }

    /// The tool requests carried by this message, if any
    pub fn tool_requests(&self) -> Option<&[ToolRequest]> {
        match &self.kind {
            MessageKind::ToolCall { requests } => Some(requests),
            _ => None,
        }
    }

    /// Whether this message ends the dispatch loop
    pub fn is_final_answer(&self) -> bool {
        self.role == Role::Assistant && matches!(self.kind, MessageKind::Text)
    }
}

/// Conversation history: an ordered, append-only sequence of messages.
///
/// This is the sole mutable state threaded through the dispatch loop; the
/// loop only ever appends, never removes or reorders.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.push(Message::system(prompt));
        conv
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Get all messages
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get the last message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(matches!(msg.kind, MessageKind::Text));
    }

    #[test]
    fn test_final_answer_discriminant() {
        assert!(Message::assistant("done").is_final_answer());
        assert!(!Message::user("hi").is_final_answer());

        let request = ToolRequest::new("weather_info", HashMap::new());
        let with_calls = Message::assistant_tool_calls("", vec![request]);
        assert!(!with_calls.is_final_answer());
        assert_eq!(with_calls.tool_requests().unwrap().len(), 1);
    }

    #[test]
    fn test_tool_result_correlation() {
        let request = ToolRequest::new("guest_info_retriever", HashMap::new());
        let result = Message::tool_result(&request, "Name: Ada Lovelace");

        match &result.kind {
            MessageKind::ToolResult { tool, call_id } => {
                assert_eq!(tool, "guest_info_retriever");
                assert_eq!(call_id, &request.call_id);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_conversation_append_only() {
        let mut conv = Conversation::with_system_prompt("You are helpful.");
        conv.push(Message::user("Hi"));
        conv.push(Message::assistant("Hello!"));

        assert_eq!(conv.len(), 3);
        assert!(conv.last().unwrap().is_final_answer());
    }

    #[test]
    fn test_tool_request_deserializes_without_id() {
        let request: ToolRequest =
            serde_json::from_str(r#"{"tool": "weather_info", "arguments": {"location": "Paris"}}"#)
                .unwrap();
        assert_eq!(request.name, "weather_info");
        assert_eq!(request.str_arg("location"), Some("Paris"));
        assert!(!request.call_id.is_empty());
    }
}
