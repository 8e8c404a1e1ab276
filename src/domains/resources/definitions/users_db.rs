//! Users database resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Live JSON view over the user store (dynamic).
pub struct UsersDbResource;

impl ResourceDefinition for UsersDbResource {
    const URI: &'static str = "db://users";
    const NAME: &'static str = "Users Database";
    const DESCRIPTION: &'static str = "In-memory database containing user information";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::UserDatabase
    }
}
