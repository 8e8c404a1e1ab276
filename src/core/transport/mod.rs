//! Transport layer for the MCP server.
//!
//! This server speaks MCP over standard input/output, the default transport
//! for the protocol. The transport handles the connection lifecycle and
//! delegates message processing to the MCP server handler.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
