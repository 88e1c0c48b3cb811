//! Open-data API client error types.

use std::sync::Arc;

use gonghun_core::{ConfigError, Error};

/// Errors from the open-data API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Query parameters failed validation before any request was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Non-success HTTP response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Structured payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Client settings could not be turned into a working client.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidQuery(msg) => Error::InvalidInput(msg),
            ApiError::Timeout => Error::Timeout("the API did not respond in time, try again shortly".into()),
            ApiError::HttpError { status } => Error::HttpStatus { status },
            ApiError::Network(e) => Error::Network(e.to_string()),
            ApiError::Parse(msg) => Error::DecodeFailed(msg),
            ApiError::Config(e) => Error::from(e),
        }
    }
}
