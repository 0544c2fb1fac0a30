//! party-agent HTTP Server
//!
//! Axum-based server exposing the party-planning agent: chat with a
//! step-by-step reasoning trace, per-session history, and session clear.
//!
//! The guest dataset is loaded and embedded at startup; failure to build
//! the index is fatal since no query can be served without it.

mod handlers;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{LlmProvider, MemorySessionStore};
use agent_runtime::{OllamaEmbedder, OllamaProvider};
use party_planner::{dataset_path, load_guests, tools, GuestIndex};

use crate::handlers::{chat_handler, clear_session, health_check, list_models};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize LLM provider
    let provider = Arc::new(OllamaProvider::from_env());

    // Verify Ollama connection
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - agent will fail");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Build the guest retrieval index; this must succeed or the process
    // cannot serve anything.
    let guests = load_guests(dataset_path()).context("loading guest dataset")?;
    let embedder = Arc::new(OllamaEmbedder::from_env());
    let index = GuestIndex::build(&guests, embedder)
        .await
        .context("building guest embedding index")?;

    // Initialize tools
    let registry = tools::registry(Arc::new(index));

    tracing::info!("Registered {} tools:", registry.len());
    for name in registry.names() {
        tracing::info!("  • {}", name);
    }

    // Build application state
    let state = AppState {
        provider,
        tools: Arc::new(registry),
        sessions: Arc::new(MemorySessionStore::new()),
        default_model: std::env::var("AGENT_MODEL")
            .unwrap_or_else(|_| "qwen2.5-coder:7b".into()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/chat", post(chat_handler))
        .route("/api/session/clear", post(clear_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🎉 party-agent server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/models        - List available models");
    tracing::info!("  POST /api/chat          - Send message, get answer + trace");
    tracing::info!("  POST /api/session/clear - Discard a session");

    axum::serve(listener, app).await?;

    Ok(())
}
