//! Result types handed to the shell layer.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

/// Icon category of a result, fixed when the result is first ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Regular,
    Directory,
    Hidden,
}

impl IconKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Directory => "directory",
            Self::Hidden => "hidden",
        }
    }
}

/// One ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct QueryMatch {
    pub path: Arc<str>,
    pub kind: IconKind,
    /// Strictly decreasing along the returned list.
    pub relevance: f64,
    /// Last path component, shown as the title.
    pub base_name: String,
    /// Containing directory with home shortened to `~`, shown as the subtitle.
    pub display_dir: String,
}

/// What to do with a chosen result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenAction {
    #[default]
    OpenItem,
    OpenContainingFolder,
}

impl OpenAction {
    /// The path the action should open.
    pub fn target<'a>(&self, path: &'a Path) -> &'a Path {
        match self {
            Self::OpenItem => path,
            Self::OpenContainingFolder => path.parent().unwrap_or(path),
        }
    }
}
