//! Guest Retrieval Tool
//!
//! Wraps the embedding index behind the single callable contract the
//! dispatch loop consumes.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolRequest, ToolResult, ToolSchema,
};

use crate::index::GuestIndex;

/// Tool for semantic guest lookup
pub struct GuestInfoTool {
    index: Arc<GuestIndex>,
}

impl GuestInfoTool {
    pub fn new(index: Arc<GuestIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Tool for GuestInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "guest_info_retriever".into(),
            description:
                "Retrieves detailed information about guests based on their name or relation using semantic search."
                    .into(),
            parameters: vec![ParameterSchema::required_string(
                "query",
                "Guest name or relation to look up (e.g., 'Ada Lovelace', 'family members')",
            )],
        }
    }

    async fn execute(&self, request: &ToolRequest) -> CoreResult<ToolResult> {
        let query = request.str_arg("query").unwrap_or_default();

        match self.index.query(query).await {
            Ok(blocks) => Ok(ToolResult::success("guest_info_retriever", blocks)),
            Err(e) => Ok(ToolResult::failure(
                "guest_info_retriever",
                format!("Guest lookup failed: {}", e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GuestRecord;
    use agent_core::Embedder;
    use std::collections::HashMap;

    struct FlatEmbedder;

    #[async_trait]
    impl Embedder for FlatEmbedder {
        async fn embed(&self, _text: &str) -> CoreResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
    }

    #[tokio::test]
    async fn test_lookup_returns_profile_blocks() {
        let guests = vec![GuestRecord::new(
            "Ada Lovelace",
            "best friend",
            "Pioneer of computing.",
            "ada@example.com",
        )];
        let index = GuestIndex::build(&guests, Arc::new(FlatEmbedder))
            .await
            .unwrap();
        let tool = GuestInfoTool::new(Arc::new(index));

        let mut args = HashMap::new();
        args.insert("query".to_string(), serde_json::json!("Ada"));
        let result = tool
            .execute(&ToolRequest::new("guest_info_retriever", args))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("Name: Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_empty_index_is_still_a_success() {
        let index = GuestIndex::build(&[], Arc::new(FlatEmbedder)).await.unwrap();
        let tool = GuestInfoTool::new(Arc::new(index));

        let mut args = HashMap::new();
        args.insert("query".to_string(), serde_json::json!("anyone"));
        let result = tool
            .execute(&ToolRequest::new("guest_info_retriever", args))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, crate::index::NO_MATCH);
    }
}
