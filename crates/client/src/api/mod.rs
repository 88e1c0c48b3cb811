//! Open-data API client for independence-activist merit records.
//!
//! ### Endpoints
//!
//! - **Base URL**: `https://e-gonghun.mpva.go.kr/opnAPI` (configurable).
//! - `contribuMeritList.do`: merit records (공훈록).
//! - `publicReportList.do`: public merit reports (공적조서).
//!
//! ### Pipeline
//!
//! 1. Validate the query and build a structural `QueryKey`.
//! 2. Serve from the expiring cache when a fresh entry exists.
//! 3. Otherwise GET the endpoint through the `Fetcher`, bounded by its timeout.
//! 4. Decode JSON directly, or run XML through the normalizer.
//! 5. Cache the page unless it carries an error flag.
//!
//! Failures are logged once and returned; nothing is retried.

pub mod error;
pub mod fetcher;
pub mod json;
pub mod request;
pub mod xml;

pub use error::ApiError;
pub use fetcher::{Fetcher, HttpFetcher};
pub use request::{Endpoint, FilterField, MAX_COUNT_PER_PAGE, Query, QueryFilter, QueryKey, ResponseFormat};

use std::sync::Arc;

use gonghun_core::{AppConfig, ExpiringCache, ResultPage};

/// Cache of decoded pages keyed by the full request.
pub type PageCache = ExpiringCache<QueryKey, ResultPage>;

/// Cache-aware client for both list endpoints.
pub struct QueryClient {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
    cache: PageCache,
}

impl QueryClient {
    /// Build a client with an HTTP fetcher and a cache from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
        Ok(Self::with_fetcher(&config.base_url, Arc::new(fetcher), ExpiringCache::new(config.cache_ttl()?)))
    }

    pub fn with_fetcher(base_url: &str, fetcher: Arc<dyn Fetcher>, cache: PageCache) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), fetcher, cache }
    }

    /// Fetch a page of merit records (공훈록).
    pub async fn merit_list(&self, query: &Query) -> Result<ResultPage, ApiError> {
        self.execute(Endpoint::MeritList, query).await
    }

    /// Fetch a page of public merit reports (공적조서).
    pub async fn public_report(&self, query: &Query) -> Result<ResultPage, ApiError> {
        self.execute(Endpoint::PublicReport, query).await
    }

    /// Drop every cached page.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    async fn execute(&self, endpoint: Endpoint, query: &Query) -> Result<ResultPage, ApiError> {
        query.validate()?;

        let key = query.cache_key(endpoint);
        if let Some(page) = self.cache.get(&key) {
            tracing::debug!(endpoint = endpoint.name(), "cache hit");
            return Ok(page);
        }

        let url = format!("{}/{}", self.base_url, endpoint.path());
        let params = query.query_params(endpoint);
        tracing::info!(endpoint = endpoint.name(), %url, ?params, "requesting page");

        let page = match self.fetch_page(&url, &params, query.format).await {
            Ok(page) => page,
            Err(e) => {
                log_failure(endpoint, &e);
                return Err(e);
            }
        };

        if page.is_error() {
            tracing::warn!(
                endpoint = endpoint.name(),
                reason = page.message.as_deref().unwrap_or_default(),
                "response carries an error flag; not caching"
            );
        } else {
            self.cache.set(key, page.clone());
        }

        Ok(page)
    }

    async fn fetch_page(
        &self, url: &str, params: &[(&'static str, String)], format: ResponseFormat,
    ) -> Result<ResultPage, ApiError> {
        let body = self.fetcher.fetch(url, params).await?;
        match format {
            ResponseFormat::Json => json::decode(&body),
            ResponseFormat::Xml => Ok(xml::normalize(&body)),
        }
    }
}

fn log_failure(endpoint: Endpoint, err: &ApiError) {
    match err {
        ApiError::Timeout => tracing::error!(endpoint = endpoint.name(), "API request timed out"),
        ApiError::HttpError { status } => tracing::error!(endpoint = endpoint.name(), status, "API returned HTTP error"),
        ApiError::Network(e) => tracing::error!(endpoint = endpoint.name(), error = %e, "API request failed"),
        other => tracing::error!(endpoint = endpoint.name(), error = %other, "unexpected failure while querying API"),
    }
}
