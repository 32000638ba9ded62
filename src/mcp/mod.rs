/// Stdin/stdout tool server
///
/// `protocol` holds the JSON-RPC and MCP wire types, `server` reads requests
/// line by line and routes tool calls to `crate::tools`.

pub mod protocol;
pub mod server;

pub use server::McpServer;
