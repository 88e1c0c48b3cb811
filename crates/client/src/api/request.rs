//! Request types, validation, and cache-key construction.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use gonghun_core::CodeTable;
use regex::Regex;

use crate::api::ApiError;

/// Largest page the API serves.
pub const MAX_COUNT_PER_PAGE: u32 = 50;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}(\d{2}){0,2}$").expect("static regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("static regex"));

/// The two list operations the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// 공훈록: merit records.
    MeritList,
    /// 공적조서: public merit reports.
    PublicReport,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::MeritList => "contribuMeritList.do",
            Endpoint::PublicReport => "publicReportList.do",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::MeritList => "merit_list",
            Endpoint::PublicReport => "public_report",
        }
    }
}

/// Payload format requested from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// Value of the `type` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            ResponseFormat::Json => "JSON",
            ResponseFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for ResponseFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(ResponseFormat::Json),
            "XML" => Ok(ResponseFormat::Xml),
            other => Err(ApiError::InvalidQuery(format!("unsupported response type: {other} (use JSON or XML)"))),
        }
    }
}

/// Optional search filters, in the order they are sent and keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    MngNo,
    NameKo,
    NameCh,
    DiffName,
    Birthday,
    Lastday,
    Sex,
    RegisterLargeDiv,
    RegisterMidDiv,
    JudgeYear,
    Hunkuk,
    WorkoutAffil,
    Achivement,
    AchivementKo,
}

impl FilterField {
    pub const ALL: [FilterField; 14] = [
        FilterField::MngNo,
        FilterField::NameKo,
        FilterField::NameCh,
        FilterField::DiffName,
        FilterField::Birthday,
        FilterField::Lastday,
        FilterField::Sex,
        FilterField::RegisterLargeDiv,
        FilterField::RegisterMidDiv,
        FilterField::JudgeYear,
        FilterField::Hunkuk,
        FilterField::WorkoutAffil,
        FilterField::Achivement,
        FilterField::AchivementKo,
    ];

    /// Query parameter name on the upstream API.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::MngNo => "mngNo",
            FilterField::NameKo => "nameKo",
            FilterField::NameCh => "nameCh",
            FilterField::DiffName => "diffName",
            FilterField::Birthday => "birthday",
            FilterField::Lastday => "lastday",
            FilterField::Sex => "sex",
            FilterField::RegisterLargeDiv => "registerLargeDiv",
            FilterField::RegisterMidDiv => "registerMidDiv",
            FilterField::JudgeYear => "judgeYear",
            FilterField::Hunkuk => "hunkuk",
            FilterField::WorkoutAffil => "workoutAffil",
            FilterField::Achivement => "achivement",
            FilterField::AchivementKo => "achivement_ko",
        }
    }

    /// `achivement_ko` only exists on the public-report endpoint.
    pub fn applies_to(self, endpoint: Endpoint) -> bool {
        !matches!((self, endpoint), (FilterField::AchivementKo, Endpoint::MeritList))
    }
}

/// Search filters shared by both endpoints. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub mng_no: Option<String>,
    pub name_ko: Option<String>,
    pub name_ch: Option<String>,
    pub diff_name: Option<String>,
    pub birthday: Option<String>,
    pub lastday: Option<String>,
    pub sex: Option<String>,
    pub register_large_div: Option<String>,
    pub register_mid_div: Option<String>,
    pub judge_year: Option<String>,
    pub hunkuk: Option<String>,
    pub workout_affil: Option<String>,
    pub achivement: Option<String>,
    pub achivement_ko: Option<String>,
}

impl QueryFilter {
    fn raw(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::MngNo => &self.mng_no,
            FilterField::NameKo => &self.name_ko,
            FilterField::NameCh => &self.name_ch,
            FilterField::DiffName => &self.diff_name,
            FilterField::Birthday => &self.birthday,
            FilterField::Lastday => &self.lastday,
            FilterField::Sex => &self.sex,
            FilterField::RegisterLargeDiv => &self.register_large_div,
            FilterField::RegisterMidDiv => &self.register_mid_div,
            FilterField::JudgeYear => &self.judge_year,
            FilterField::Hunkuk => &self.hunkuk,
            FilterField::WorkoutAffil => &self.workout_affil,
            FilterField::Achivement => &self.achivement,
            FilterField::AchivementKo => &self.achivement_ko,
        }
    }

    /// The value of `field`, or `None` when it is unset or empty.
    pub fn value(&self, field: FilterField) -> Option<&str> {
        self.raw(field).as_deref().filter(|v| !v.is_empty())
    }

    /// Present filters that apply to `endpoint`, in fixed field order.
    pub fn present(&self, endpoint: Endpoint) -> impl Iterator<Item = (FilterField, &str)> {
        FilterField::ALL
            .into_iter()
            .filter(move |field| field.applies_to(endpoint))
            .filter_map(move |field| self.value(field).map(|v| (field, v)))
    }

    /// Validate coded and date-shaped filters.
    ///
    /// Returns an error if a code is not in its table or a date is not
    /// `YYYY`, `YYYYMM` or `YYYYMMDD`.
    pub fn validate(&self) -> Result<(), ApiError> {
        let coded = [
            (FilterField::Sex, CodeTable::Sex),
            (FilterField::Hunkuk, CodeTable::Hunkuk),
            (FilterField::WorkoutAffil, CodeTable::WorkoutAffil),
        ];
        for (field, table) in coded {
            if let Some(code) = self.value(field)
                && !table.contains(code)
            {
                let known: Vec<_> = table.codes().collect();
                return Err(ApiError::InvalidQuery(format!(
                    "unknown {} code: {} (expected one of {})",
                    table.field(),
                    code,
                    known.join(", ")
                )));
            }
        }

        for field in [FilterField::Birthday, FilterField::Lastday] {
            if let Some(date) = self.value(field)
                && !DATE_RE.is_match(date)
            {
                return Err(ApiError::InvalidQuery(format!(
                    "{} must be YYYY, YYYYMM or YYYYMMDD, got {}",
                    field.param_name(),
                    date
                )));
            }
        }

        if let Some(year) = self.value(FilterField::JudgeYear)
            && !YEAR_RE.is_match(year)
        {
            return Err(ApiError::InvalidQuery(format!("judgeYear must be a 4-digit year, got {year}")));
        }

        Ok(())
    }
}

/// A single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// 1-based page number (default 1).
    pub page_index: u32,
    /// Rows per page (default 10, at most 50).
    pub count_per_page: u32,
    pub format: ResponseFormat,
    pub filter: QueryFilter,
}

impl Default for Query {
    fn default() -> Self {
        Self { page_index: 1, count_per_page: 10, format: ResponseFormat::Json, filter: QueryFilter::default() }
    }
}

impl Query {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page_index == 0 {
            return Err(ApiError::InvalidQuery("page_index starts at 1".into()));
        }
        if !(1..=MAX_COUNT_PER_PAGE).contains(&self.count_per_page) {
            return Err(ApiError::InvalidQuery(format!(
                "count_per_page must be 1-{MAX_COUNT_PER_PAGE}, got {}",
                self.count_per_page
            )));
        }
        self.filter.validate()
    }

    /// Upstream query parameters; absent and empty filters are omitted.
    pub fn query_params(&self, endpoint: Endpoint) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("nPageIndex", self.page_index.to_string()),
            ("nCountPerPage", self.count_per_page.to_string()),
            ("type", self.format.as_param().to_string()),
        ];
        params.extend(
            self.filter
                .present(endpoint)
                .map(|(field, value)| (field.param_name(), value.to_string())),
        );
        params
    }

    pub fn cache_key(&self, endpoint: Endpoint) -> QueryKey {
        QueryKey {
            endpoint,
            format: self.format,
            page_index: self.page_index,
            count_per_page: self.count_per_page,
            filters: self
                .filter
                .present(endpoint)
                .map(|(field, value)| (field, value.to_string()))
                .collect(),
        }
    }
}

/// Structural cache key: each present filter is stored with its field tag, so
/// values can never bleed into one another the way joined strings can.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub endpoint: Endpoint,
    pub format: ResponseFormat,
    pub page_index: u32,
    pub count_per_page: u32,
    pub filters: Vec<(FilterField, String)>,
}
