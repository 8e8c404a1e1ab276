//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. It maintains a
//! registry of available resources and handles read requests; dynamic
//! content (the user database view) is resolved against the shared store at
//! read time, so the resource always reflects the latest inserts.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::info;

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::tools::definitions::users::UserStore;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// The user store backing the `db://users` resource.
    store: Arc<UserStore>,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata and content provider
    resources: HashMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Live JSON view over the user store.
    UserDatabase,
}

impl ResourceService {
    /// Create a new ResourceService backed by the given user store.
    pub fn new(store: Arc<UserStore>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            store,
            resources: HashMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::text(text, uri),
            ResourceContent::UserDatabase => {
                let users = self.store.all();
                ResourceContents::text(
                    serde_json::to_string_pretty(&users)
                        .map_err(|e| ResourceError::internal(e.to_string()))?,
                    uri,
                )
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{AnnotateAble, RawResource};

    fn test_service() -> ResourceService {
        ResourceService::new(Arc::new(UserStore::with_sample_users()))
    }

    fn contents_text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_lists_users_db_resource() {
        let service = test_service();
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, "db://users");
    }

    #[tokio::test]
    async fn test_read_users_db() {
        let service = test_service();
        let result = service.read_resource("db://users").await.unwrap();
        let text = contents_text(&result);
        assert!(text.contains("john@example.com"));
        assert!(text.contains("jane@example.com"));
        assert!(text.contains("bob@example.com"));
    }

    #[tokio::test]
    async fn test_read_reflects_later_inserts() {
        let store = Arc::new(UserStore::with_sample_users());
        let service = ResourceService::new(store.clone());
        store.insert("Alice Cooper", "alice@example.com").unwrap();

        let result = service.read_resource("db://users").await.unwrap();
        assert!(contents_text(&result).contains("alice@example.com"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = test_service();
        let result = service.read_resource("db://nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_registered_text_resource() {
        let mut service = test_service();
        let mut raw = RawResource::new("mcp://server/motd", "Message of the Day");
        raw.mime_type = Some("text/plain".to_string());
        service.register_resource(ResourceEntry {
            resource: raw.no_annotation(),
            content: ResourceContent::Text("hello".to_string()),
        });

        let result = service.read_resource("mcp://server/motd").await.unwrap();
        assert_eq!(contents_text(&result), "hello");
    }
}
