//! Core types and shared functionality for gonghun-mcp.
//!
//! This crate provides:
//! - In-memory expiring cache with an injectable clock
//! - Static code tables (sex, honor grade, movement affiliation)
//! - The canonical record model returned by both response formats
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod codes;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{Clock, ExpiringCache, ManualClock, SystemClock};
pub use codes::CodeTable;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{Link, Record, Reference, ResultPage};
