//! gonghun-mcp server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use gonghun_client::QueryClient;
use gonghun_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;

mod error;
mod handler;
mod logging;
mod prompts;
mod resources;
mod tools;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let log_handle = logging::init(&config.log_level);

    tracing::info!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        cache_ttl_secs = config.cache_ttl_secs,
        "Starting gonghun-mcp server on stdio transport"
    );

    let client = QueryClient::new(&config)?;
    let handler = handler::GonghunServer::new(Arc::new(client), Some(log_handle));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    tracing::info!("gonghun-mcp server stopped");
    Ok(())
}
