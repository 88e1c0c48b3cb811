//! Tool-facing rendering of outcomes.
//!
//! Tool failures are not JSON-RPC errors: hosts receive an `is_error` tool
//! result whose text is `{"error": true, "message": ...}`. Only output that
//! cannot be serialized at all surfaces as an internal error.

use gonghun_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Indented JSON, or an internal error when the value will not serialize.
pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize output: {e}"), None))
}

/// Render a tool outcome as indented JSON text.
pub fn respond<T: Serialize>(result: Result<T, Error>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(to_pretty(&value)?)])),
        Err(err) => Ok(failure(&err)?),
    }
}

/// The `{error, message}` result for a failed tool call.
pub fn failure(err: &Error) -> Result<CallToolResult, McpError> {
    tracing::error!(error = %err, "tool call failed");
    Ok(CallToolResult::error(vec![Content::text(to_pretty(&err.to_json())?)]))
}
