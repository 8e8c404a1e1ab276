//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools (the static catalog)
//! - Dispatch of tool calls to the matching handler
//! - The failure boundary: every outcome of a call, including unknown tool
//!   names and malformed arguments, comes back as a single text content
//!   block - `call_tool` cannot fail.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::config::Config;

use super::definitions::{
    calculator::CalculateTool,
    users::{AddUserTool, QueryUsersTool, UserStore},
    weather::{GetWeatherTool, WeatherClient},
};
use super::error::ToolError;

/// Tool registry - manages all available tools.
///
/// The registry owns the handlers' collaborators (the shared user store and
/// the weather client) and is the single source of truth for the tool
/// catalog. It is created once at startup and lives for the process
/// duration.
pub struct ToolRegistry {
    store: Arc<UserStore>,
    weather: WeatherClient,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>, store: Arc<UserStore>) -> Self {
        Self {
            store,
            weather: WeatherClient::new(&config.credentials),
        }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            AddUserTool::NAME,
            CalculateTool::NAME,
            GetWeatherTool::NAME,
            QueryUsersTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the advertised tool catalog.
    /// The list is order-stable: repeated calls return identical descriptor
    /// sequences.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            AddUserTool::to_tool(),
            CalculateTool::to_tool(),
            GetWeatherTool::to_tool(),
            QueryUsersTool::to_tool(),
        ]
    }

    /// Call a tool by name.
    ///
    /// This is the failure boundary for the whole server: lookup, argument
    /// extraction, and handler execution all happen behind it, and any
    /// `ToolError` is converted into an `"Error: {message}"` text block
    /// rather than surfacing to the transport.
    pub fn call_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match self.dispatch(name, arguments) {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool call failed before handler ran: {}", e);
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }

    /// Route a validated invocation to the matching handler.
    fn dispatch(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        match name {
            AddUserTool::NAME => Ok(AddUserTool::execute(&parse_params(arguments)?, &self.store)),
            CalculateTool::NAME => Ok(CalculateTool::execute(&parse_params(arguments)?)),
            GetWeatherTool::NAME => {
                Ok(GetWeatherTool::execute(&parse_params(arguments)?, &self.weather))
            }
            QueryUsersTool::NAME => {
                Ok(QueryUsersTool::execute(&parse_params(arguments)?, &self.store))
            }
            _ => Err(ToolError::not_found(name)),
        }
    }
}

/// Extract a tool's parameters from the raw argument object.
///
/// A missing required field or a wrong-shaped value surfaces as
/// `ToolError::InvalidArguments` with serde's message naming the field.
fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(
            Arc::new(Config::default()),
            Arc::new(UserStore::with_sample_users()),
        )
    }

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"get_weather"));
        assert!(names.contains(&"calculate"));
        assert!(names.contains(&"query_users"));
        assert!(names.contains(&"add_user"));
    }

    #[test]
    fn test_get_all_tools_metadata() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 4);
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.as_deref().unwrap_or_default().is_empty());
        }
    }

    #[test]
    fn test_get_all_tools_required_fields() {
        let tools = ToolRegistry::get_all_tools();
        let required_of = |name: &str| -> Vec<String> {
            let tool = tools.iter().find(|t| t.name == name).unwrap();
            tool.input_schema
                .get("required")
                .and_then(|r| r.as_array())
                .map(|a| {
                    a.iter()
                        .filter_map(|v| v.as_str().map(String::from))
                        .collect()
                })
                .unwrap_or_default()
        };

        assert_eq!(required_of("get_weather"), vec!["location"]);
        assert_eq!(required_of("calculate"), vec!["expression"]);
        assert!(required_of("query_users").is_empty());
        let mut add_user = required_of("add_user");
        add_user.sort();
        assert_eq!(add_user, vec!["email", "name"]);
    }

    #[test]
    fn test_listing_is_idempotent() {
        let first = serde_json::to_string(&ToolRegistry::get_all_tools()).unwrap();
        let second = serde_json::to_string(&ToolRegistry::get_all_tools()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_call_unknown_tool() {
        let registry = test_registry();
        let result = registry.call_tool("does_not_exist", JsonObject::new());
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(
            result_text(&result),
            "Error: Unknown tool: does_not_exist"
        );
    }

    #[test]
    fn test_call_missing_required_argument() {
        let registry = test_registry();
        let result = registry.call_tool("calculate", JsonObject::new());
        assert!(result.is_error.unwrap_or(false));
        let text = result_text(&result);
        assert!(text.starts_with("Error: "));
        assert!(text.contains("expression"));
    }

    #[test]
    fn test_call_wrongly_typed_argument() {
        let registry = test_registry();
        let args = serde_json::json!({ "expression": 42 });
        let result = registry.call_tool("calculate", args.as_object().unwrap().clone());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).starts_with("Error: "));
    }

    #[test]
    fn test_call_calculate_success() {
        let registry = test_registry();
        let args = serde_json::json!({ "expression": "sqrt(16)" });
        let result = registry.call_tool("calculate", args.as_object().unwrap().clone());
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "sqrt(16) = 4.0");
    }

    #[test]
    fn test_call_query_users_success() {
        let registry = test_registry();
        let args = serde_json::json!({ "name_filter": "John", "limit": 10 });
        let result = registry.call_tool("query_users", args.as_object().unwrap().clone());
        assert!(!result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("John Doe"));
    }

    #[test]
    fn test_failure_leaves_registry_usable() {
        let registry = test_registry();
        let _ = registry.call_tool("nope", JsonObject::new());
        let args = serde_json::json!({ "expression": "2 + 3 * 4" });
        let result = registry.call_tool("calculate", args.as_object().unwrap().clone());
        assert_eq!(result_text(&result), "2 + 3 * 4 = 14.0");
    }
}
