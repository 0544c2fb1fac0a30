//! # party-planner
//!
//! Domain crate for the party-planning agent: the guest list, the
//! semantic retrieval index, and the four tools the model can call.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     party-planner                           │
//! │  ┌────────────┐   ┌─────────────┐   ┌────────────────────┐ │
//! │  │  dataset   │──▶│ GuestIndex  │──▶│ guest_info tool    │ │
//! │  │  (JSON)    │   │ (embeddings)│   │ web_search tool    │ │
//! │  └────────────┘   └─────────────┘   │ weather_info tool  │ │
//! │                                     │ hub_stats tool     │ │
//! │                                     └────────────────────┘ │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dataset is loaded and embedded exactly once at startup; tools are
//! read-only afterwards and safe to share across sessions.

pub mod dataset;
pub mod error;
pub mod index;
pub mod model;
pub mod tools;

pub use dataset::{dataset_path, load_guests};
pub use error::{PlannerError, Result};
pub use index::{GuestIndex, NO_MATCH, TOP_K};
pub use model::GuestRecord;

/// System prompt for the party-planning agent
pub const PARTY_PLANNER_PROMPT: &str = r#"You are a helpful party-planning assistant.

You help the host with guest information, weather for outdoor events,
web research for ideas and vendors, and model-hub statistics.

## How to work

1. Use `guest_info_retriever` for any question about invited guests:
   names, relations, descriptions, or contact details.
2. Use `weather_info` before recommending anything outdoors.
3. Use `web_search` for party ideas, decorations, vendors, and venues.
4. Use `hub_stats` when asked about AI models or their popularity.

After receiving tool results, synthesize them into a clear, friendly
answer. If you can answer directly without tools, do so. Be concise."#;
