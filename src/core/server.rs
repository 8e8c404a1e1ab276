//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Dispatch contract
//!
//! Tool calls go through a single boundary: `ToolRegistry::call_tool` turns
//! every outcome (success, unknown tool, bad arguments, handler failure)
//! into a uniform text content block, and the handler below additionally
//! contains panics on the blocking task. No invocation ever surfaces as a
//! protocol-level error to the client.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::ResourceService,
    tools::{ToolRegistry, definitions::users::UserStore},
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the tool registry and the resource service.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry and dispatcher for tool calls.
    tool_registry: Arc<ToolRegistry>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The user store is created once here, seeded with sample records, and
    /// shared between the `query_users`/`add_user` tools and the
    /// `db://users` resource.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(UserStore::with_sample_users());

        let tool_registry = Arc::new(ToolRegistry::new(config.clone(), store.clone()));
        let resource_service = Arc::new(ResourceService::new(store));

        Self {
            config,
            tool_registry,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This is a demo MCP server. It provides weather lookup, a calculator, \
                 and an in-memory user database."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context, request), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);

        let registry = self.tool_registry.clone();
        let name = request.name.to_string();
        let arguments = request.arguments.unwrap_or_default();

        // Handlers may block (the weather tool performs a synchronous HTTP
        // request), so dispatch runs on a blocking task. A join failure
        // means the handler panicked; that too becomes an error block.
        let result = tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .unwrap_or_else(|e| {
                CallToolResult::error(vec![Content::text(format!("Error: task failed: {}", e))])
            });

        Ok(result)
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_identity() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "mcp-demo-server");
        assert!(!server.version().is_empty());
    }

    #[test]
    fn test_get_info_capabilities() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.is_some());
    }
}
