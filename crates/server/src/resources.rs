//! `gonghun://` resources.
//!
//! | URI                     | Content                               |
//! |-------------------------|---------------------------------------|
//! | `gonghun://merit/all`   | first page of merit records (10 rows) |
//! | `gonghun://report/all`  | first page of public reports          |
//! | `gonghun://code/hunkuk` | honor-grade code table                |
//! | `gonghun://code/workout`| movement-affiliation code table       |

use gonghun_client::{Query, QueryClient};
use gonghun_core::{CodeTable, Error};
use rmcp::{
    ErrorData as McpError,
    model::{Annotated, RawResource, Resource},
};
use url::Url;

use crate::error::to_pretty;

pub const SCHEME: &str = "gonghun";
const MIME_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GonghunResource {
    MeritList,
    PublicReport,
    Codes(CodeTable),
}

impl GonghunResource {
    pub const ALL: [GonghunResource; 4] = [
        GonghunResource::MeritList,
        GonghunResource::PublicReport,
        GonghunResource::Codes(CodeTable::Hunkuk),
        GonghunResource::Codes(CodeTable::WorkoutAffil),
    ];

    pub fn uri(self) -> &'static str {
        match self {
            GonghunResource::MeritList => "gonghun://merit/all",
            GonghunResource::PublicReport => "gonghun://report/all",
            GonghunResource::Codes(CodeTable::Hunkuk) => "gonghun://code/hunkuk",
            GonghunResource::Codes(CodeTable::WorkoutAffil) => "gonghun://code/workout",
            GonghunResource::Codes(CodeTable::Sex) => "gonghun://code/sex",
        }
    }

    fn name(self) -> &'static str {
        match self {
            GonghunResource::MeritList => "독립유공자 공훈록",
            GonghunResource::PublicReport => "독립유공자 공적조서",
            GonghunResource::Codes(CodeTable::Hunkuk) => "훈격 코드 정보",
            GonghunResource::Codes(CodeTable::WorkoutAffil) => "운동계열 코드 정보",
            GonghunResource::Codes(CodeTable::Sex) => "성별 코드 정보",
        }
    }

    fn description(self) -> &'static str {
        match self {
            GonghunResource::MeritList => "독립유공자 공훈록 정보 - 독립유공자의 기본 정보와 포상 내역을 제공합니다.",
            GonghunResource::PublicReport => {
                "독립유공자 공적조서 정보 - 독립유공자의 상세한 활동 내역과 공적 사항을 제공합니다."
            }
            GonghunResource::Codes(CodeTable::Hunkuk) => {
                "독립유공자 훈격 코드 정보 - 건국훈장, 건국포장, 대통령표창 등의 훈격 분류 체계를 제공합니다."
            }
            GonghunResource::Codes(CodeTable::WorkoutAffil) => {
                "독립유공자 운동계열 코드 정보 - 3.1운동, 의병, 광복군, 임시정부 등 독립운동 유형 분류 체계를 제공합니다."
            }
            GonghunResource::Codes(CodeTable::Sex) => "성별 코드 정보",
        }
    }

    /// Resolve a `gonghun://{type}/{id}` URI.
    pub fn parse(uri: &str) -> Result<Self, Error> {
        let parsed = Url::parse(uri).map_err(|e| Error::InvalidInput(format!("malformed resource URI {uri}: {e}")))?;
        if parsed.scheme() != SCHEME {
            return Err(Error::InvalidInput(format!("unsupported resource scheme: {}", parsed.scheme())));
        }

        let kind = parsed.host_str().unwrap_or_default();
        let id = parsed
            .path_segments()
            .into_iter()
            .flatten()
            .find(|segment| !segment.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("resource URI must look like gonghun://{{type}}/{{id}}: {uri}")))?;

        match (kind, id) {
            ("merit", "all") => Ok(GonghunResource::MeritList),
            ("report", "all") => Ok(GonghunResource::PublicReport),
            ("code", "hunkuk") => Ok(GonghunResource::Codes(CodeTable::Hunkuk)),
            ("code", "workout") => Ok(GonghunResource::Codes(CodeTable::WorkoutAffil)),
            ("code", "sex") => Ok(GonghunResource::Codes(CodeTable::Sex)),
            _ => Err(Error::ResourceNotFound(uri.to_string())),
        }
    }
}

/// The advertised resource listing.
pub fn list() -> Vec<Resource> {
    GonghunResource::ALL
        .into_iter()
        .map(|resource| {
            let mut raw = RawResource::new(resource.uri(), resource.name());
            raw.description = Some(resource.description().to_string());
            raw.mime_type = Some(MIME_JSON.to_string());
            Annotated::new(raw, None)
        })
        .collect()
}

/// Read a resource as indented JSON.
pub async fn read(client: &QueryClient, uri: &str) -> Result<String, McpError> {
    let resource = GonghunResource::parse(uri)?;
    tracing::info!(uri, "reading resource");

    match resource {
        GonghunResource::MeritList => {
            let page = client.merit_list(&Query::default()).await.map_err(Error::from)?;
            to_pretty(&page)
        }
        GonghunResource::PublicReport => {
            let page = client.public_report(&Query::default()).await.map_err(Error::from)?;
            to_pretty(&page)
        }
        GonghunResource::Codes(table) => to_pretty(&table.to_json()),
    }
}
