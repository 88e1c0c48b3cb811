//! get_merit_list and get_public_report tool implementations.
//!
//! Both tools share the paging arguments and the 13 common filters;
//! `get_public_report` additionally accepts `achivement_ko`.

use gonghun_client::{MAX_COUNT_PER_PAGE, Query, QueryClient, QueryFilter, ResponseFormat};
use gonghun_core::{Error, ResultPage};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{respond, to_pretty};

/// Filters shared by both list tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchFilters {
    /// 관리번호
    #[serde(default)]
    pub mng_no: Option<String>,

    /// 성명(한글)
    #[serde(default)]
    pub name_ko: Option<String>,

    /// 성명(한자)
    #[serde(default)]
    pub name_ch: Option<String>,

    /// 이명
    #[serde(default)]
    pub diff_name: Option<String>,

    /// 생년월일: 년(1945), 년월(194501) 또는 년월일(19450101)
    #[serde(default)]
    pub birthday: Option<String>,

    /// 사망년월일: 년(1945), 년월(194501) 또는 년월일(19450101)
    #[serde(default)]
    pub lastday: Option<String>,

    /// 성별 (0: 여, 1: 남)
    #[serde(default)]
    pub sex: Option<String>,

    /// 본적대분류
    #[serde(default)]
    pub register_large_div: Option<String>,

    /// 본적중분류
    #[serde(default)]
    pub register_mid_div: Option<String>,

    /// 포상년도 (YYYY)
    #[serde(default)]
    pub judge_year: Option<String>,

    /// 훈격 코드 (get_hunkuk_codes 참고)
    #[serde(default)]
    pub hunkuk: Option<String>,

    /// 운동계열 코드 (get_workout_affil_codes 참고)
    #[serde(default)]
    pub workout_affil: Option<String>,

    /// 공훈록 또는 공적개요 검색어
    #[serde(default)]
    pub achivement: Option<String>,
}

impl SearchFilters {
    fn into_filter(self, achivement_ko: Option<String>) -> QueryFilter {
        QueryFilter {
            mng_no: self.mng_no,
            name_ko: self.name_ko,
            name_ch: self.name_ch,
            diff_name: self.diff_name,
            birthday: self.birthday,
            lastday: self.lastday,
            sex: self.sex,
            register_large_div: self.register_large_div,
            register_mid_div: self.register_mid_div,
            judge_year: self.judge_year,
            hunkuk: self.hunkuk,
            workout_affil: self.workout_affil,
            achivement: self.achivement,
            achivement_ko,
        }
    }
}

/// Parameters for the get_merit_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MeritListParams {
    /// 페이지 번호 (기본값 1)
    #[serde(default)]
    pub page_index: Option<u32>,

    /// 페이지 당 데이터 건수 (기본값 10, 최대 50건)
    #[serde(default)]
    pub count_per_page: Option<u32>,

    /// 응답 형식: JSON (기본값) 또는 XML
    #[serde(default)]
    pub response_type: Option<String>,

    #[serde(flatten)]
    pub filters: SearchFilters,
}

/// Parameters for the get_public_report tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PublicReportParams {
    #[serde(flatten)]
    pub base: MeritListParams,

    /// 공적개요 국한문병기 검색어
    #[serde(default)]
    pub achivement_ko: Option<String>,
}

impl MeritListParams {
    fn into_query(self, achivement_ko: Option<String>) -> Result<Query, Error> {
        let format = match self.response_type.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<ResponseFormat>()?,
            None => ResponseFormat::default(),
        };

        Ok(Query {
            page_index: self.page_index.unwrap_or(1),
            count_per_page: self.count_per_page.unwrap_or(10).min(MAX_COUNT_PER_PAGE),
            format,
            filter: self.filters.into_filter(achivement_ko),
        })
    }
}

async fn fetch_merit_list(client: &QueryClient, params: MeritListParams) -> Result<ResultPage, Error> {
    let query = params.into_query(None)?;
    Ok(client.merit_list(&query).await?)
}

async fn fetch_public_report(client: &QueryClient, params: PublicReportParams) -> Result<ResultPage, Error> {
    let query = params.base.into_query(params.achivement_ko)?;
    Ok(client.public_report(&query).await?)
}

/// Pages flagged as errors are returned as error results, body intact.
fn page_result(result: Result<ResultPage, Error>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(page) if page.is_error() => Ok(CallToolResult::error(vec![Content::text(to_pretty(&page)?)])),
        other => respond(other),
    }
}

/// Implementation of the get_merit_list tool.
pub async fn merit_list_impl(client: &QueryClient, params: MeritListParams) -> Result<CallToolResult, McpError> {
    tracing::info!(?params, "get_merit_list");
    page_result(fetch_merit_list(client, params).await)
}

/// Implementation of the get_public_report tool.
pub async fn public_report_impl(client: &QueryClient, params: PublicReportParams) -> Result<CallToolResult, McpError> {
    tracing::info!(?params, "get_public_report");
    page_result(fetch_public_report(client, params).await)
}
