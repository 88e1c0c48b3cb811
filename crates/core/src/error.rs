//! Unified error types for gonghun-mcp.
//!
//! Messages carry a stable code prefix so hosts can match on them even after
//! they have been flattened into `{error, message}` tool results.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the gonghun-mcp server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., unknown honor-grade code).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Unknown resource URI or prompt name.
    #[error("RESOURCE_NOT_FOUND: {0}")]
    ResourceNotFound(String),

    /// Upstream API did not answer within the configured timeout.
    #[error("API_TIMEOUT: {0}")]
    Timeout(String),

    /// Upstream API answered with a non-success status.
    #[error("HTTP_ERROR: status {status}")]
    HttpStatus { status: u16 },

    /// Connection, TLS or body transfer failure.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Upstream payload could not be decoded.
    #[error("DECODE_FAILED: {0}")]
    DecodeFailed(String),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),
}

impl Error {
    /// Render the error as the `{error, message}` object hosts expect in tool output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": true, "message": self.to_string() })
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) | Error::ResourceNotFound(_) => -32602,
            Error::Timeout(_) => -32006,
            Error::HttpStatus { .. } => -32008,
            Error::Network(_) => -32009,
            Error::DecodeFailed(_) => -32010,
            Error::Config(_) => -32011,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
