//! Common utilities shared across tool definitions.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_error_result_is_flagged() {
        let result = error_result("boom");
        assert!(result.is_error.unwrap_or(false));
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "boom"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_success_result_is_not_flagged() {
        let result = success_result("ok".to_string());
        assert!(!result.is_error.unwrap_or(false));
    }
}
