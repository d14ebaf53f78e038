//! Glob matching of candidate paths against a parsed query.

use std::ffi::{CStr, CString};

use super::descriptor::Query;

/// A query pattern compiled once and applied to many candidate paths.
///
/// Matching is `fnmatch(3)` with `FNM_PATHNAME`: wildcards never match a `/`
/// and a backslash escapes the next character, as in the index tool. A failed
/// match is retried with an implicit trailing `*` unless the match is anchored
/// at the end of the path. Case-insensitive queries compare Unicode lowercase
/// forms.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    query: Query,
    pattern: Option<FnmatchPattern>,
}

#[derive(Debug, Clone)]
struct FnmatchPattern {
    exact: CString,
    widened: Option<CString>,
}

impl CompiledQuery {
    pub fn new(query: Query) -> Self {
        let pattern = FnmatchPattern::new(
            query.pattern(),
            query.locate_query.ignore_case,
            query.directory_only(),
        );
        Self { query, pattern }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Checks the pattern part of a query against `path`; file type is not
    /// considered here.
    pub fn matches_path(&self, path: &str) -> bool {
        let Some(pattern) = self.pattern.as_ref() else {
            return false;
        };
        let base_name_only = self.query.locate_query.base_name_only;

        let folded;
        let path = if self.query.locate_query.ignore_case {
            folded = path.to_lowercase();
            folded.as_str()
        } else {
            path
        };

        if self.query.absolute {
            let candidate = if base_name_only {
                match path.strip_prefix('/') {
                    Some(rest) => rest,
                    None => return false,
                }
            } else {
                path
            };
            return pattern.matches(candidate);
        }

        if !base_name_only || self.query.directory_only() {
            for (index, ch) in path.char_indices().rev() {
                if base_name_only && ch == '/' {
                    break;
                }
                if pattern.matches(&path[index..]) {
                    return true;
                }
            }
            return false;
        }

        // The index tool already matched the base name.
        true
    }
}

impl FnmatchPattern {
    fn new(pattern: &str, ignore_case: bool, anchored_at_end: bool) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        let pattern = if ignore_case {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };

        let widened = if anchored_at_end || pattern.ends_with('*') {
            None
        } else {
            c_pattern(format!("{pattern}*"))
        };
        Some(Self {
            exact: c_pattern(pattern)?,
            widened,
        })
    }

    fn matches(&self, candidate: &str) -> bool {
        let Ok(name) = CString::new(candidate) else {
            return false;
        };
        fnmatch(&self.exact, &name)
            || self
                .widened
                .as_deref()
                .is_some_and(|widened| fnmatch(widened, &name))
    }
}

/// A pattern with an interior NUL can never match a path.
fn c_pattern(pattern: String) -> Option<CString> {
    CString::new(pattern)
        .map_err(|error| log::debug!("pattern rejected: {error}"))
        .ok()
}

fn fnmatch(pattern: &CStr, name: &CStr) -> bool {
    // SAFETY: both pointers come from live NUL-terminated strings and
    // fnmatch(3) only reads them.
    unsafe { libc::fnmatch(pattern.as_ptr(), name.as_ptr(), libc::FNM_PATHNAME) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    fn compiled(raw: &str) -> CompiledQuery {
        CompiledQuery::new(parse_query(raw))
    }

    #[test]
    fn absolute_base_name_matches_top_level_component() {
        let query = compiled("/usr");
        assert!(query.matches_path("/usr"));
        assert!(query.matches_path("/usrlocal"));
        assert!(!query.matches_path("/usr/bin"));
        assert!(!query.matches_path("/opt/usr"));
        assert!(!query.matches_path("usr"));
    }

    #[test]
    fn absolute_directory_is_anchored_at_end() {
        let query = compiled("/usr/");
        assert!(query.matches_path("/usr"));
        assert!(!query.matches_path("/usrlocal"));
    }

    #[test]
    fn absolute_full_path_pattern() {
        let query = compiled("/home/*/notes");
        assert!(query.matches_path("/home/u/notes"));
        assert!(query.matches_path("/home/u/notes.md"));
        assert!(!query.matches_path("/home/u/x/notes"));
    }

    #[test]
    fn relative_fragment_matches_any_suffix_position() {
        let query = compiled("src/ma");
        assert!(query.matches_path("/repo/src/main.rs"));
        assert!(query.matches_path("/repo/mysrc/main.rs"));
        assert!(!query.matches_path("/repo/src/lib.rs"));
    }

    #[test]
    fn directory_only_base_name_stops_at_separator() {
        let query = compiled("bin/");
        assert!(query.matches_path("/usr/bin"));
        assert!(query.matches_path("/usr/sbin"));
        assert!(!query.matches_path("/usr/binaries"));
        assert!(!query.matches_path("/usr/bin/ls"));
    }

    #[test]
    fn plain_base_name_trusts_the_index() {
        let query = compiled("anything");
        assert!(query.matches_path("/completely/different"));
    }

    #[test]
    fn case_follows_query() {
        assert!(compiled("/Src/").matches_path("/Src"));
        assert!(!compiled("/Src/").matches_path("/src"));
        assert!(compiled("/src/").matches_path("/SRC"));
    }

    #[test]
    fn wildcards_do_not_cross_separators() {
        let query = compiled("/a*c");
        assert!(query.matches_path("/abc"));
        assert!(!query.matches_path("/ab/c"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let query = compiled("/[draft");
        assert!(query.matches_path("/[draft] notes"));
        assert!(!query.matches_path("/draft"));
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        assert!(!compiled("").matches_path("/anything"));
        assert!(!compiled("/").matches_path("/"));
    }

    #[test]
    fn multibyte_paths_scan_on_char_boundaries() {
        assert!(compiled("ün/").matches_path("/tmp/grün"));
        assert!(compiled("ü/").matches_path("/tmp/ü"));
        assert!(!compiled("ü/").matches_path("/tmp/grün"));
    }

    #[test]
    fn double_star_stays_within_one_component() {
        let query = compiled("/home/**/notes");
        assert!(query.matches_path("/home/u/notes"));
        assert!(!query.matches_path("/home/u/x/y/notes"));

        let query = compiled("/foo**");
        assert!(query.matches_path("/foobar"));
        assert!(!query.matches_path("/foo/bar"));
    }

    #[test]
    fn backslash_escapes_wildcards() {
        let query = compiled("/a\\*b/");
        assert!(query.matches_path("/a*b"));
        assert!(!query.matches_path("/a\\xb"));
        assert!(!query.matches_path("/axb"));
    }

    #[test]
    fn ignore_case_folds_non_ascii_letters() {
        let query = compiled("ärger/");
        assert!(query.query().locate_query.ignore_case);
        assert!(query.matches_path("/tmp/Ärger"));
        assert!(query.matches_path("/tmp/ärger"));

        let query = compiled("ÄRGER/");
        assert!(!query.matches_path("/tmp/ärger"));
    }
}
