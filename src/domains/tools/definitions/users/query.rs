//! Query users tool definition.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::success_result;
use super::store::UserStore;

/// Default limit for query results.
fn default_limit() -> usize {
    10
}

/// Parameters for the query users tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryUsersParams {
    /// Optional name filter.
    #[schemars(description = "Filter users by name (optional)")]
    pub name_filter: Option<String>,

    /// Maximum number of results.
    #[schemars(description = "Maximum results (default: 10)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Query users tool - filtered, limited scan over the user store.
pub struct QueryUsersTool;

impl QueryUsersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "query_users";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Query users from the database";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(filter = ?params.name_filter, limit = params.limit))]
    pub fn execute(params: &QueryUsersParams, store: &UserStore) -> CallToolResult {
        info!("Query users tool called");

        let users = store.query(params.name_filter.as_deref(), params.limit);

        // An empty result set is not an error; it still gets a descriptive block.
        if users.is_empty() {
            return success_result("No users found.".to_string());
        }

        let entries: Vec<String> = users
            .iter()
            .map(|u| {
                format!(
                    "ID: {}\nName: {}\nEmail: {}\nCreated: {}",
                    u.id,
                    u.name,
                    u.email,
                    u.created_display()
                )
            })
            .collect();

        success_result(format!(
            "Found {} users:\n\n{}",
            users.len(),
            entries.join("\n\n")
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QueryUsersParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
