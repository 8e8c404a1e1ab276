//! Add user tool definition.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::super::common::{error_result, success_result};
use super::store::{StoreError, UserStore};

/// Parameters for the add user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddUserParams {
    /// Name of the user to add.
    #[schemars(description = "User full name")]
    pub name: String,

    /// Email of the user to add.
    #[schemars(description = "User email address")]
    pub email: String,
}

/// Add user tool - inserts a record into the user store.
pub struct AddUserTool;

impl AddUserTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_user";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new user to the database";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub fn execute(params: &AddUserParams, store: &UserStore) -> CallToolResult {
        info!("Add user tool called");

        match store.insert(&params.name, &params.email) {
            Ok(user) => success_result(format!(
                "Successfully added user: {} ({}) with ID: {}",
                user.name, user.email, user.id
            )),
            // The duplicate-email condition has a deterministic cause worth
            // its own message.
            Err(e @ StoreError::DuplicateEmail(_)) => error_result(&format!("Error: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddUserParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
