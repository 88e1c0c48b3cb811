//! clear_cache tool implementation.

use gonghun_client::QueryClient;
use gonghun_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::respond;

/// Output from the clear_cache tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearCacheOutput {
    pub success: bool,
    pub message: String,
    /// Number of entries dropped, expired ones included.
    pub cleared: usize,
}

/// Implementation of the clear_cache tool.
pub fn clear_cache_impl(client: &QueryClient) -> Result<CallToolResult, McpError> {
    let cleared = client.cache().len();
    client.clear_cache();

    respond(Ok::<_, Error>(ClearCacheOutput {
        success: true,
        message: "캐시가 성공적으로 초기화되었습니다.".to_string(),
        cleared,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PAGE_JSON, client_replying};
    use gonghun_client::Query;

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let (client, fetcher) = client_replying(PAGE_JSON);
        client.merit_list(&Query::default()).await.unwrap();
        client.merit_list(&Query::default()).await.unwrap();
        assert_eq!(fetcher.calls(), 1);

        let result = clear_cache_impl(&client).unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let output: ClearCacheOutput = serde_json::from_str(content_val["text"].as_str().unwrap()).unwrap();

        assert!(output.success);
        assert_eq!(output.cleared, 1);
        assert!(client.cache().is_empty());

        client.merit_list(&Query::default()).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
    }
}
