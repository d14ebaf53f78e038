//! Candidate inclusion and file type classification.

use std::fs;

use super::descriptor::Query;
use super::matcher::CompiledQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteredStatus {
    Rejected,
    Regular,
    Directory,
}

impl FilteredStatus {
    pub fn is_accepted(self) -> bool {
        self != Self::Rejected
    }
}

/// Full filter: pattern re-check, then existence and type.
pub fn filter_query(path: &str, query: &CompiledQuery) -> FilteredStatus {
    if !query.matches_path(path) {
        return FilteredStatus::Rejected;
    }
    refilter_query(path, query.query())
}

/// Existence and type check only, for re-validating cached results whose
/// pattern match cannot have changed.
pub fn refilter_query(path: &str, query: &Query) -> FilteredStatus {
    let status = classify_path(path);
    if query.directory_only() && status != FilteredStatus::Directory {
        return FilteredStatus::Rejected;
    }
    status
}

/// Classifies a path without following symlinks. Paths that vanished since the
/// index was built are rejected, not reported.
fn classify_path(path: &str) -> FilteredStatus {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return FilteredStatus::Rejected;
    };
    let file_type = metadata.file_type();
    if file_type.is_file() {
        FilteredStatus::Regular
    } else if file_type.is_dir() {
        FilteredStatus::Directory
    } else {
        FilteredStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    fn path_str(path: &std::path::Path) -> String {
        path.to_string_lossy().to_string()
    }

    #[test]
    fn classifies_regular_files_and_directories() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let file = temp.path().join("notes.txt");
        fs::write(&file, b"n").expect("write file");

        let query = CompiledQuery::new(parse_query("notes"));
        assert_eq!(filter_query(&path_str(&file), &query), FilteredStatus::Regular);
        assert_eq!(
            filter_query(&path_str(temp.path()), &query),
            FilteredStatus::Directory
        );
    }

    #[test]
    fn missing_paths_are_rejected() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let gone = temp.path().join("gone.txt");
        let query = CompiledQuery::new(parse_query("gone"));
        assert_eq!(filter_query(&path_str(&gone), &query), FilteredStatus::Rejected);
    }

    #[test]
    fn directory_queries_reject_files() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let dir = temp.path().join("reports");
        fs::create_dir(&dir).expect("mkdir");
        let file = temp.path().join("reports.txt");
        fs::write(&file, b"r").expect("write file");

        let query = CompiledQuery::new(parse_query("reports/"));
        assert_eq!(filter_query(&path_str(&dir), &query), FilteredStatus::Directory);
        assert_eq!(filter_query(&path_str(&file), &query), FilteredStatus::Rejected);
    }

    #[test]
    fn pattern_mismatch_is_rejected_before_stat() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let file = temp.path().join("alpha");
        fs::write(&file, b"a").expect("write file");

        let query = CompiledQuery::new(parse_query("beta/"));
        assert_eq!(filter_query(&path_str(&file), &query), FilteredStatus::Rejected);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let target = temp.path().join("target");
        fs::create_dir(&target).expect("mkdir");
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("symlink");

        let query = CompiledQuery::new(parse_query("link"));
        assert_eq!(filter_query(&path_str(&link), &query), FilteredStatus::Rejected);
    }

    #[test]
    fn refilter_keeps_paths_that_still_exist() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let file = temp.path().join("kept.txt");
        fs::write(&file, b"k").expect("write file");
        let query = CompiledQuery::new(parse_query("kept"));
        let path = path_str(&file);

        let first = filter_query(&path, &query);
        assert!(first.is_accepted());
        for _ in 0..3 {
            assert_eq!(refilter_query(&path, query.query()), first);
        }

        fs::remove_file(&file).expect("remove");
        assert_eq!(refilter_query(&path, query.query()), FilteredStatus::Rejected);
    }
}
