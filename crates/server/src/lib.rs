// Domain-driven module structure for the CloudWatch Logs MCP server.

// Core infrastructure
pub mod client;
pub mod state;

// Domain modules
pub mod runtime;
pub mod conf;
pub mod logs;
pub mod rpc;
pub mod tools;
