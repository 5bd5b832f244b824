//! JSON-RPC 2.0 tool server over stdio.
//!
//! Lets MCP clients check interactions, classify drugs, list the catalog and
//! predict side effects without going through the CLI.

/// Server loop and request dispatch.
pub mod server;

/// Tool definitions and dispatch.
pub mod tools;

/// JSON-RPC 2.0 transport types.
pub mod transport;

pub use server::McpServer;
pub use tools::{get_tool_definitions, handle_tool_call, ToolDefinition};
pub use transport::{
    error_code, ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCall,
};
