//! Structured query descriptors used as cache keys.

/// The parameters of one external index lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocateQuery {
    pub pattern: String,
    /// Match against the last path component only (`locate -b`).
    pub base_name_only: bool,
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FileTypeFilter {
    #[default]
    All,
    /// Only directories; also anchors the pattern at the end of the path.
    OnlyDirectories,
}

impl FileTypeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OnlyDirectories => "only_dir",
        }
    }
}

/// A fully parsed user query.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Query {
    pub locate_query: LocateQuery,
    /// The pattern is anchored at the start of the full path.
    pub absolute: bool,
    pub file_type_filter: FileTypeFilter,
}

impl Query {
    pub fn directory_only(&self) -> bool {
        self.file_type_filter == FileTypeFilter::OnlyDirectories
    }

    pub fn pattern(&self) -> &str {
        self.locate_query.pattern.as_str()
    }

    /// An empty pattern matches nothing; callers short-circuit to no results.
    pub fn is_empty(&self) -> bool {
        self.locate_query.pattern.is_empty()
    }
}
