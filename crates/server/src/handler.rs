//! MCP server handler implementation.
//!
//! This module defines the main server handler that routes tool calls to the
//! tool implementations and serves the `gonghun://` resources and prompts.

use std::sync::Arc;

use gonghun_client::QueryClient;
use gonghun_core::CodeTable;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
        SetLevelRequestParam,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::logging::{self, LogHandle};
use crate::tools::{
    MeritListParams, PublicReportParams, clear_cache_impl, codes_impl, merit_list_impl, public_report_impl,
};
use crate::{prompts, resources};

const INSTRUCTIONS: &str = "국가보훈부 공훈전자사료관 오픈API로 독립유공자 공훈록과 공적조서를 조회합니다. \
                            훈격, 운동계열, 성별 필터에는 코드 조회 도구가 돌려주는 코드를 사용하세요.";

/// The main MCP server handler for gonghun-mcp.
#[derive(Clone)]
pub struct GonghunServer {
    client: Arc<QueryClient>,
    log_handle: Option<LogHandle>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GonghunServer {
    /// Create a new server handler. Without a log handle `logging/setLevel` is a no-op.
    pub fn new(client: Arc<QueryClient>, log_handle: Option<LogHandle>) -> Self {
        Self { client, log_handle, tool_router: Self::tool_router() }
    }

    #[tool(description = "독립유공자 공훈록 목록을 조회합니다")]
    async fn get_merit_list(&self, params: Parameters<MeritListParams>) -> Result<CallToolResult, McpError> {
        merit_list_impl(&self.client, params.0).await
    }

    #[tool(description = "독립유공자 공적조서를 조회합니다")]
    async fn get_public_report(&self, params: Parameters<PublicReportParams>) -> Result<CallToolResult, McpError> {
        public_report_impl(&self.client, params.0).await
    }

    #[tool(description = "훈격 코드 정보를 조회합니다")]
    async fn get_hunkuk_codes(&self) -> Result<CallToolResult, McpError> {
        codes_impl(CodeTable::Hunkuk)
    }

    #[tool(description = "운동계열 코드 정보를 조회합니다")]
    async fn get_workout_affil_codes(&self) -> Result<CallToolResult, McpError> {
        codes_impl(CodeTable::WorkoutAffil)
    }

    #[tool(description = "성별 코드 정보를 조회합니다")]
    async fn get_sex_codes(&self) -> Result<CallToolResult, McpError> {
        codes_impl(CodeTable::Sex)
    }

    #[tool(description = "캐시된 데이터를 모두 초기화합니다")]
    async fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        clear_cache_impl(&self.client)
    }
}

impl ServerHandler for GonghunServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "gonghun-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }

    async fn list_resources(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult { meta: None, resources: resources::list(), next_cursor: None })
    }

    async fn read_resource(
        &self, request: ReadResourceRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = resources::read(&self.client, &request.uri).await?;
        Ok(ReadResourceResult { contents: vec![ResourceContents::text(text, request.uri)] })
    }

    async fn list_prompts(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult { meta: None, prompts: prompts::list(), next_cursor: None })
    }

    async fn get_prompt(
        &self, request: GetPromptRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        Ok(prompts::render(&request.name, request.arguments.as_ref())?)
    }

    async fn set_level(
        &self, request: SetLevelRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<(), McpError> {
        match &self.log_handle {
            Some(handle) => logging::apply(handle, request.level),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PAGE_JSON, client_replying};
    use gonghun_core::ResultPage;

    fn server() -> (GonghunServer, Arc<crate::test_support::StaticFetcher>) {
        let (client, fetcher) = client_replying(PAGE_JSON);
        (GonghunServer::new(Arc::new(client), None), fetcher)
    }

    fn page(result: &CallToolResult) -> ResultPage {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        serde_json::from_str(content_val["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_info_advertises_capabilities() {
        let (server, _) = server();
        let info = server.get_info();

        assert_eq!(info.server_info.name, "gonghun-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.logging.is_some());
    }

    #[test]
    fn test_tool_listing() {
        let (server, _) = server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            [
                "clear_cache",
                "get_hunkuk_codes",
                "get_merit_list",
                "get_public_report",
                "get_sex_codes",
                "get_workout_affil_codes"
            ]
        );
    }

    #[tokio::test]
    async fn test_merit_list_cached_until_clear() {
        let (server, fetcher) = server();
        let params = || {
            let mut params = MeritListParams { page_index: Some(1), count_per_page: Some(10), ..Default::default() };
            params.filters.name_ko = Some("유관순".into());
            Parameters(params)
        };

        let first = server.get_merit_list(params()).await.unwrap();
        assert_eq!(fetcher.calls(), 1);

        let second = server.get_merit_list(params()).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(page(&first), page(&second));

        server.clear_cache().await.unwrap();
        server.get_merit_list(params()).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_code_tools() {
        let (server, fetcher) = server();

        let result = server.get_workout_affil_codes().await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let codes: serde_json::Value = serde_json::from_str(content_val["text"].as_str().unwrap()).unwrap();

        assert_eq!(codes["UGC00003"], "3.1운동");
        assert_eq!(fetcher.calls(), 0);
    }
}
