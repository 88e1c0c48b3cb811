//! Log setup and runtime level control.
//!
//! Logs are JSON on stderr; stdout carries the JSON-RPC stream. The filter
//! sits behind a reload layer so `logging/setLevel` can change it live.

use rmcp::{ErrorData as McpError, model::LoggingLevel};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) -> LogHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();

    handle
}

/// Closest tracing directive for an MCP logging level.
pub fn directive(level: LoggingLevel) -> &'static str {
    match level {
        LoggingLevel::Debug => "debug",
        LoggingLevel::Info | LoggingLevel::Notice => "info",
        LoggingLevel::Warning => "warn",
        LoggingLevel::Error | LoggingLevel::Critical | LoggingLevel::Alert | LoggingLevel::Emergency => "error",
    }
}

/// Swap the active filter for `level`.
pub fn apply(handle: &LogHandle, level: LoggingLevel) -> Result<(), McpError> {
    let directive = directive(level);
    handle
        .reload(EnvFilter::new(directive))
        .map_err(|e| McpError::internal_error(format!("Failed to change log level: {e}"), None))?;

    tracing::info!(level = directive, "log level changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_mapping() {
        assert_eq!(directive(LoggingLevel::Debug), "debug");
        assert_eq!(directive(LoggingLevel::Notice), "info");
        assert_eq!(directive(LoggingLevel::Warning), "warn");
        assert_eq!(directive(LoggingLevel::Emergency), "error");
    }

    #[test]
    fn test_apply_reloads_filter() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        let _subscriber = tracing_subscriber::registry().with(layer);

        apply(&handle, LoggingLevel::Debug).unwrap();

        let current = handle.with_current(|filter| filter.to_string()).unwrap();
        assert_eq!(current, "debug");
    }

    #[test]
    fn test_apply_without_subscriber_fails() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        drop(layer);

        assert!(apply(&handle, LoggingLevel::Error).is_err());
    }
}
