//! MCP tool implementations.
//!
//! This module contains all tools exposed by the gonghun-mcp server.

pub mod cache;
pub mod codes;
pub mod search;

pub use cache::clear_cache_impl;
pub use codes::codes_impl;
pub use search::{MeritListParams, PublicReportParams, merit_list_impl, public_report_impl};
