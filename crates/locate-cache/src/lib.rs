//! Caching and ranking front end for `locate`-style filename indexes.
//!
//! This crate provides:
//! - Query parsing into structured, hashable descriptors
//! - Streaming execution of the external index tool
//! - Glob and file type filtering of candidate paths
//! - A raw lookup cache and a ranked per-query cache with re-validation
//! - Full invalidation when the index database is rebuilt

pub mod backend;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod pool;
pub mod query;
pub mod runner;
pub mod staleness;
pub mod types;

// Re-export main types
pub use backend::{database_mtime, CommandBackend, LocateBackend};
pub use config::{load_locate_config, LocateConfig, RecordDelimiter};
pub use engine::{CacheStats, LocateEngine, SharedLocateEngine};
pub use error::{LocateError, Result};
pub use query::{parse_query, FileTypeFilter, LocateQuery, Query};
pub use types::{IconKind, OpenAction, QueryMatch};
