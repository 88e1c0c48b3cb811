//! Outbound transport.
//!
//! `QueryClient` only talks to the network through the `Fetcher` trait, so
//! the transport can be swapped (tests count calls with an in-memory fake).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;

use crate::api::ApiError;

/// Issues one GET request and returns the response body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, ApiError>;
}

/// reqwest-backed fetcher with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::Network(Arc::new(e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, ApiError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json, application/xml;q=0.9, */*;q=0.8")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(ApiError::HttpError { status: status.as_u16() });
        }

        let body = response.text().await?;
        tracing::debug!("fetched {} bytes in {:?}", body.len(), start.elapsed());

        Ok(body)
    }
}
