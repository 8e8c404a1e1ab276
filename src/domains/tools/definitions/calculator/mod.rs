//! Calculator tool definition.
//!
//! Evaluates a restricted arithmetic expression against the closed symbol
//! table in [`parser`]. See the parser module for the accepted grammar.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, success_result};

pub mod parser;

pub use parser::{EvalError, evaluate};

/// Parameters for the calculator tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// The expression to evaluate.
    #[schemars(description = "Mathematical expression (e.g., \"2 + 2\", \"sqrt(16)\")")]
    pub expression: String,
}

/// Calculator tool - evaluates restricted arithmetic expressions.
pub struct CalculateTool;

impl CalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform mathematical calculations safely";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(expression = %params.expression))]
    pub fn execute(params: &CalculateParams) -> CallToolResult {
        info!("Calculator tool called");

        match evaluate(&params.expression) {
            Ok(value) => success_result(format!(
                "{} = {}",
                params.expression,
                format_value(value)
            )),
            Err(e) => error_result(&format!("Calculation error: {}", e)),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CalculateParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Render an evaluated value for display.
///
/// Integral results keep one decimal place ("sqrt(16) = 4.0"); everything
/// else uses the shortest round-trip representation.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
