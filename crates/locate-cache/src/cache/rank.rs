//! Relevance ordering of result paths.

use std::cmp::Ordering;

use crate::paths::{is_hidden, split_dir_base, HomeLayout};

/// Sort key of one path; smaller ranks first.
///
/// Fields compare in declaration order: paths inside home, then non-hidden
/// paths, then shorter base names, then shorter directories. Lengths count
/// Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    outside_home: bool,
    hidden: bool,
    base_name_chars: usize,
    dir_name_chars: usize,
}

impl RankKey {
    pub fn of(layout: &HomeLayout, path: &str) -> Self {
        let (dir, base) = split_dir_base(path);
        Self {
            outside_home: !layout.is_in_home(path),
            hidden: is_hidden(path),
            base_name_chars: base.chars().count(),
            dir_name_chars: dir.chars().count(),
        }
    }
}

pub fn compare_paths(layout: &HomeLayout, left: &str, right: &str) -> Ordering {
    RankKey::of(layout, left).cmp(&RankKey::of(layout, right))
}

/// Stable sort; equally ranked items keep their relative order.
pub fn rank_by_path<T>(items: &mut [T], layout: &HomeLayout, path: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| RankKey::of(layout, path(item)));
}
