/// Wire types for the MCP tool server
///
/// Requests and responses are JSON-RPC 2.0 objects, one per line. Field names
/// in MCP result payloads are camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::DomainError;
use crate::ServerError;

pub const MCP_VERSION: &str = "2024-11-05";

/// Incoming request; a missing `id` marks a notification
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Outgoing reply carrying exactly one of `result` or `error`
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// `params` of a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// `result` of a `tools/call` request
///
/// Domain failures travel here with `isError` set, not as JSON-RPC errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Always "text" here
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// One entry of the `tools/list` reply
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema derived from the tool's params type
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

/// `result` of the `initialize` handshake
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

pub mod error_codes {
    // Reserved by JSON-RPC 2.0
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Server-defined
    pub const HABIT_NOT_FOUND: i32 = -32001;
    pub const VALIDATION_ERROR: i32 = -32003;
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

impl ToolCallResult {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error,
        }
    }

    pub fn success(text: String) -> Self {
        Self::text(text, false)
    }

    /// Tool-level failure, shown to the client as "Error: ..."
    pub fn error(error_message: String) -> Self {
        Self::text(format!("Error: {}", error_message), true)
    }
}

/// Map server errors to JSON-RPC error codes
pub fn server_error_to_json_rpc_code(error: &ServerError) -> i32 {
    match error {
        ServerError::Domain(DomainError::NotFound { .. }) => error_codes::HABIT_NOT_FOUND,
        ServerError::Domain(DomainError::Validation(_)) => error_codes::VALIDATION_ERROR,
        ServerError::Storage(_) => error_codes::STORAGE_ERROR,
        ServerError::Json(_) => error_codes::INVALID_PARAMS,
        ServerError::Io(_) => error_codes::INTERNAL_ERROR,
    }
}
