//! Raw user text to [`Query`].

use super::descriptor::{FileTypeFilter, LocateQuery, Query};

/// Parses raw query text. Total over all inputs.
///
/// - a leading `/` anchors the pattern at the path start (`absolute`)
/// - a trailing `/` restricts results to directories
/// - any uppercase character makes the query case sensitive
/// - an internal `/` switches from base-name to whole-path matching, keeping
///   the leading `/` in the pattern
pub fn parse_query(raw: &str) -> Query {
    let mut query = Query {
        locate_query: LocateQuery {
            pattern: String::new(),
            base_name_only: true,
            ignore_case: true,
        },
        absolute: false,
        file_type_filter: FileTypeFilter::All,
    };

    let mut body = raw;
    if let Some(rest) = body.strip_prefix('/') {
        body = rest;
        query.absolute = true;
    }
    if let Some(rest) = body.strip_suffix('/') {
        body = rest;
        query.file_type_filter = FileTypeFilter::OnlyDirectories;
    }
    if body.is_empty() {
        return query;
    }

    if body.chars().any(char::is_uppercase) {
        query.locate_query.ignore_case = false;
    }

    if body.contains('/') {
        query.locate_query.base_name_only = false;
        // Keep the leading separator, drop only the trailing one.
        let end = if query.directory_only() {
            raw.len() - 1
        } else {
            raw.len()
        };
        query.locate_query.pattern = raw[..end].to_string();
    } else {
        query.locate_query.pattern = body.to_string();
    }

    query
}
