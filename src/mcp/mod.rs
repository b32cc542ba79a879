//! MCP protocol bridge.
//!
//! A JSON-RPC 2.0 server over stdio that exposes a fixed set of workspace
//! tools. Every tool call is checked against the access resolver before the
//! underlying API operation executes; requests that touch resources outside
//! the configured root scope are refused.

mod dispatch;
mod server;
mod tools;

pub use dispatch::McpMethod;
pub use server::McpServer;
pub use tools::{ToolDefinition, ToolRegistry};
