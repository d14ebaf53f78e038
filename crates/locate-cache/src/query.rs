//! Query parsing and candidate filtering.
//!
//! - Descriptor types used as cache keys
//! - Parsing of raw user text
//! - Glob matching against candidate paths
//! - Existence and file type filtering

mod descriptor;
mod filter;
mod matcher;
mod parser;

pub use descriptor::{FileTypeFilter, LocateQuery, Query};
pub use filter::{filter_query, refilter_query, FilteredStatus};
pub use matcher::CompiledQuery;
pub use parser::parse_query;
