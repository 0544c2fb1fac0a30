//! Hub Stats Tool
//!
//! Looks up the most-downloaded model for an author on the Hugging Face
//! Hub via its public REST API.

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolRequest, ToolResult, ToolSchema,
};

use crate::error::Result;

const HUB_ENDPOINT: &str = "https://huggingface.co/api/models";

#[derive(Debug, Deserialize)]
struct HubModel {
    id: String,

    #[serde(default)]
    downloads: u64,
}

/// Tool for model-hub download statistics
pub struct HubStatsTool {
    client: reqwest::Client,
}

impl Default for HubStatsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl HubStatsTool {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn most_downloaded(&self, author: &str) -> Result<Option<HubModel>> {
        let url = format!(
            "{}?author={}&sort=downloads&direction=-1&limit=1",
            HUB_ENDPOINT,
            urlencoding::encode(author)
        );

        let mut models: Vec<HubModel> = self.client.get(&url).send().await?.json().await?;

        Ok(if models.is_empty() {
            None
        } else {
            Some(models.remove(0))
        })
    }
}

#[async_trait]
impl Tool for HubStatsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "hub_stats".into(),
            description:
                "Fetches the most downloaded model from a specific author on the Hugging Face Hub."
                    .into(),
            parameters: vec![ParameterSchema::required_string(
                "author",
                "Hub author or organization name (e.g., 'google')",
            )],
        }
    }

    async fn execute(&self, request: &ToolRequest) -> CoreResult<ToolResult> {
        let author = request.str_arg("author").unwrap_or_default();

        match self.most_downloaded(author).await {
            Ok(Some(model)) => Ok(ToolResult::success(
                "hub_stats",
                format!(
                    "The most downloaded model by {} is {} with {} downloads.",
                    author, model.id, model.downloads
                ),
            )),
            Ok(None) => Ok(ToolResult::failure(
                "hub_stats",
                format!("No models found for author '{}'", author),
            )),
            Err(e) => Ok(ToolResult::failure(
                "hub_stats",
                format!("Hub lookup failed: {}", e),
            )),
        }
    }
}
