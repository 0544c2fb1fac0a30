//! Weather Tool
//!
//! Returns dummy weather for a location. The upstream course tool this
//! mirrors picks a random canned condition rather than calling a real
//! weather service.

use async_trait::async_trait;
use rand::Rng;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolRequest, ToolResult, ToolSchema,
};

const CONDITIONS: [(&str, i32); 4] = [
    ("Rainy", 15),
    ("Clear", 25),
    ("Windy", 20),
    ("Partly cloudy", 22),
];

/// Tool reporting (dummy) weather for outdoor-party planning
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "weather_info".into(),
            description: "Fetches weather information for a given location.".into(),
            parameters: vec![ParameterSchema::required_string(
                "location",
                "City or place to get weather for (e.g., 'New York')",
            )],
        }
    }

    async fn execute(&self, request: &ToolRequest) -> CoreResult<ToolResult> {
        let location = request.str_arg("location").unwrap_or("the venue");

        let (condition, temp_c) = CONDITIONS[rand::thread_rng().gen_range(0..CONDITIONS.len())];

        Ok(ToolResult::success(
            "weather_info",
            format!("Weather in {}: {}, {}°C", location, condition, temp_c),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_reports_for_requested_location() {
        let mut args = HashMap::new();
        args.insert("location".to_string(), serde_json::json!("Gotham"));

        let result = WeatherTool
            .execute(&ToolRequest::new("weather_info", args))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.starts_with("Weather in Gotham:"));
        assert!(CONDITIONS.iter().any(|(c, _)| result.output.contains(c)));
    }
}
