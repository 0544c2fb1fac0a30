//! Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool` for the party
//! planner. The tool set is fixed at startup.

mod guest_info;
mod hub_stats;
mod search;
mod weather;

pub use guest_info::GuestInfoTool;
pub use hub_stats::HubStatsTool;
pub use search::WebSearchTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use agent_core::ToolRegistry;

use crate::index::GuestIndex;

/// Build the full party-planning registry:
/// {guest_info_retriever, web_search, weather_info, hub_stats}
pub fn registry(index: Arc<GuestIndex>) -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(GuestInfoTool::new(index));
    tools.register(WebSearchTool::new());
    tools.register(WeatherTool);
    tools.register(HubStatsTool::new());
    tools
}
