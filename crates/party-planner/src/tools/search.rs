//! Web Search Tool
//!
//! Thin wrapper over the DuckDuckGo Instant Answer API.

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolRequest, ToolResult, ToolSchema,
};

use crate::error::Result;

const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// How many related topics to fall back to when there is no abstract
const MAX_TOPICS: usize = 3;

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,

    #[serde(rename = "Heading", default)]
    heading: String,

    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
}

/// Tool for general web lookups (venues, vendors, party ideas)
pub struct WebSearchTool {
    client: reqwest::Client,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let url = format!(
            "{}?q={}&format=json&no_html=1&skip_disambig=1",
            SEARCH_ENDPOINT,
            urlencoding::encode(query)
        );

        let answer: InstantAnswer = self.client.get(&url).send().await?.json().await?;

        Ok(render_answer(&answer))
    }
}

/// Pick the abstract when present, otherwise the first few related topics
fn render_answer(answer: &InstantAnswer) -> Option<String> {
    if !answer.abstract_text.is_empty() {
        let mut text = String::new();
        if !answer.heading.is_empty() {
            text.push_str(&answer.heading);
            text.push_str(": ");
        }
        text.push_str(&answer.abstract_text);
        return Some(text);
    }

    let topics: Vec<&str> = answer
        .related_topics
        .iter()
        .filter(|t| !t.text.is_empty())
        .take(MAX_TOPICS)
        .map(|t| t.text.as_str())
        .collect();

    if topics.is_empty() {
        None
    } else {
        Some(topics.join("\n"))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "web_search".into(),
            description: "Search the web for information such as party ideas, vendors, and venues."
                .into(),
            parameters: vec![ParameterSchema::required_string(
                "query",
                "Search query (e.g., 'birthday party decoration ideas')",
            )],
        }
    }

    async fn execute(&self, request: &ToolRequest) -> CoreResult<ToolResult> {
        let query = request.str_arg("query").unwrap_or_default();

        match self.search(query).await {
            Ok(Some(text)) => Ok(ToolResult::success("web_search", text)),
            Ok(None) => Ok(ToolResult::failure(
                "web_search",
                format!("No results found for '{}'", query),
            )),
            Err(e) => Ok(ToolResult::failure(
                "web_search",
                format!("Search failed: {}", e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefers_abstract() {
        let answer = InstantAnswer {
            abstract_text: "A party is a gathering.".into(),
            heading: "Party".into(),
            related_topics: vec![RelatedTopic {
                text: "ignored".into(),
            }],
        };

        assert_eq!(
            render_answer(&answer).unwrap(),
            "Party: A party is a gathering."
        );
    }

    #[test]
    fn test_render_falls_back_to_topics() {
        let answer = InstantAnswer {
            abstract_text: String::new(),
            heading: String::new(),
            related_topics: vec![
                RelatedTopic { text: "one".into() },
                RelatedTopic { text: String::new() },
                RelatedTopic { text: "two".into() },
            ],
        };

        assert_eq!(render_answer(&answer).unwrap(), "one\ntwo");
    }

    #[test]
    fn test_render_empty_answer() {
        let answer = InstantAnswer {
            abstract_text: String::new(),
            heading: String::new(),
            related_topics: vec![],
        };

        assert!(render_answer(&answer).is_none());
    }
}
