//! Weather tool definition.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, success_result};

pub mod client;

pub use client::{WeatherClient, WeatherError, WeatherReport};

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// The location to look up.
    #[schemars(description = "City name (e.g., \"New York\" or \"London,UK\")")]
    pub location: String,
}

/// Weather tool - fetches current conditions from OpenWeatherMap.
pub struct GetWeatherTool;

impl GetWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get current weather for a location using OpenWeatherMap API";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = %params.location))]
    pub fn execute(params: &WeatherParams, client: &WeatherClient) -> CallToolResult {
        info!("Weather tool called");

        match client.fetch(&params.location) {
            Ok(summary) => success_result(summary),
            // A missing key is a configuration condition, reported as a
            // plain block rather than an error.
            Err(e @ WeatherError::MissingApiKey) => success_result(e.to_string()),
            Err(e) => error_result(&format!("Weather error: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<WeatherParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
