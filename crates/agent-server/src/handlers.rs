//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use agent_core::{
    Agent, AgentConfig, GenerationOptions, Message, MessageKind, ModelInfo, Role, Session,
    SessionId, SessionStore,
};
use party_planner::PARTY_PLANNER_PROMPT;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ollama_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// One entry of the reasoning trace, classified by the message's
/// constructed kind
#[derive(Debug, Serialize)]
pub struct Step {
    pub kind: StepKind,
    pub content: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    User,
    ToolCall,
    ToolResult,
    FinalAnswer,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: String,
    pub steps: Vec<Step>,
    pub error: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ollama_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ollama_connected,
    })
}

/// List available models
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, (StatusCode, Json<ErrorResponse>)> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.user_message(),
                code: "PROVIDER_UNAVAILABLE".into(),
            }),
        )
    })
}

/// Main chat endpoint.
///
/// Loads or creates the session, runs the dispatch loop, and returns the
/// final answer plus a step-by-step trace of this turn. A provider
/// failure yields an apology answer with `error: true`; prior history is
/// preserved in the store either way.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = payload
        .session_id
        .map(SessionId::from_string)
        .unwrap_or_default();

    let mut session = state
        .sessions
        .load(&session_id)
        .map_err(store_error)?
        .unwrap_or_else(|| {
            let mut session = Session::with_system_prompt(PARTY_PLANNER_PROMPT);
            session.id = session_id.clone();
            session
        });

    session.conversation.push(Message::user(&payload.message));
    let turn_start = session.conversation.len() - 1;

    let config = AgentConfig {
        system_prompt: PARTY_PLANNER_PROMPT.into(),
        generation: GenerationOptions {
            model: payload
                .model
                .unwrap_or_else(|| state.default_model.clone()),
            ..Default::default()
        },
        ..Default::default()
    };
    let agent = Agent::new(state.provider.clone(), state.tools.clone(), config);

    let outcome = agent.invoke(&mut session.conversation).await;

    session.touch();
    let steps = classify_steps(&session.conversation.messages()[turn_start..]);
    state.sessions.save(&session).map_err(store_error)?;

    let response = match outcome {
        Ok(answer) => ChatResponse {
            answer,
            session_id: session.id.to_string(),
            steps,
            error: false,
        },
        Err(e) => {
            tracing::error!("Agent error: {}", e);
            ChatResponse {
                answer: format!("Sorry, I encountered an error: {}", e.user_message()),
                session_id: session.id.to_string(),
                steps,
                error: true,
            }
        }
    };

    Ok(Json(response))
}

/// Discard a session and everything in it
pub async fn clear_session(
    State(state): State<AppState>,
    Json(payload): Json<ClearRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let id = SessionId::from_string(payload.session_id);
    state.sessions.delete(&id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

fn store_error(e: agent_core::AgentError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!("Session store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.user_message(),
            code: "SESSION_ERROR".into(),
        }),
    )
}

/// Classify one turn's messages for step-by-step display
fn classify_steps(messages: &[Message]) -> Vec<Step> {
    messages
        .iter()
        .filter_map(|m| match (&m.role, &m.kind) {
            (Role::System, _) => None,
            (Role::User, _) => Some(Step {
                kind: StepKind::User,
                content: m.content.clone(),
            }),
            (_, MessageKind::ToolCall { requests }) => {
                let lines: Vec<String> = requests
                    .iter()
                    .map(|r| {
                        let args: Vec<String> = r
                            .arguments
                            .iter()
                            .map(|(k, v)| format!("{}: {}", k, v))
                            .collect();
                        format!("Tool: {} ({})", r.name, args.join(", "))
                    })
                    .collect();
                Some(Step {
                    kind: StepKind::ToolCall,
                    content: lines.join("\n"),
                })
            }
            (_, MessageKind::ToolResult { .. }) => Some(Step {
                kind: StepKind::ToolResult,
                content: m.content.clone(),
            }),
            (Role::Assistant, MessageKind::Text) => Some(Step {
                kind: StepKind::FinalAnswer,
                content: m.content.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ToolRequest;
    use std::collections::HashMap;

    #[test]
    fn test_classify_full_turn() {
        let request = ToolRequest::new("weather_info", HashMap::new());
        let messages = vec![
            Message::system("prompt"),
            Message::user("Weather in Paris?"),
            Message::assistant_tool_calls("", vec![request.clone()]),
            Message::tool_result(&request, "[Tool 'weather_info' returned]\nClear, 25°C"),
            Message::assistant("It will be clear, 25°C."),
        ];

        let steps = classify_steps(&messages);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].kind, StepKind::User);
        assert_eq!(steps[1].kind, StepKind::ToolCall);
        assert!(steps[1].content.contains("weather_info"));
        assert_eq!(steps[2].kind, StepKind::ToolResult);
        assert_eq!(steps[3].kind, StepKind::FinalAnswer);
    }
}
