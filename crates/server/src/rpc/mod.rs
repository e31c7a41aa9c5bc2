//! RPC module — JSON-RPC 2.0 framing and the MCP method handler.

pub mod frame;
pub mod handler;

pub use handler::McpServer;
