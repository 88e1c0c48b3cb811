//! Client code for gonghun-mcp.
//!
//! This crate provides the open-data API client: request building, the
//! response-format decoders, and the cache-aware query pipeline shared by
//! the server.

pub mod api;

pub use api::{
    ApiError, Endpoint, Fetcher, FilterField, HttpFetcher, MAX_COUNT_PER_PAGE, PageCache, Query, QueryClient,
    QueryFilter, QueryKey, ResponseFormat,
};
