//! Engine configuration.
//!
//! Every field has a default matching a stock Linux install of `plocate` or
//! `mlocate`, so an absent config file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LocateError, Result};

pub const DEFAULT_LOCATE_PROGRAM: &str = "/usr/bin/locate";
pub const DEFAULT_RESULT_LIMIT: usize = 1024;
pub const DEFAULT_STALENESS_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_RELEVANCE_SCALE: f64 = 0.25;

/// Database locations probed for the index modification time, in priority order.
pub const DEFAULT_DATABASE_PATHS: &[&str] = &[
    "/var/lib/plocate/plocate.db",
    "/var/lib/mlocate/mlocate.db",
    "/var/lib/slocate/slocate.db",
];

/// Home-relative locations whose contents never show up in results.
pub const DEFAULT_EXCLUDED_SUBDIRS: &[&str] =
    &[".local/share/Trash/", ".local/share/RecentDocuments/"];

/// How the index tool separates records on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordDelimiter {
    #[default]
    Nul,
    Newline,
}

impl RecordDelimiter {
    pub fn byte(self) -> u8 {
        match self {
            Self::Nul => b'\0',
            Self::Newline => b'\n',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    pub program: PathBuf,
    pub delimiter: RecordDelimiter,
    /// Passed to the tool as `-l`; bounds both output volume and latency.
    pub limit: usize,
    pub staleness_interval_secs: u64,
    pub database_paths: Vec<PathBuf>,
    /// Falls back to the user's home directory when unset.
    pub home: Option<PathBuf>,
    pub excluded_subdirs: Vec<String>,
    pub relevance_scale: f64,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_LOCATE_PROGRAM),
            delimiter: RecordDelimiter::default(),
            limit: DEFAULT_RESULT_LIMIT,
            staleness_interval_secs: DEFAULT_STALENESS_INTERVAL_SECS,
            database_paths: DEFAULT_DATABASE_PATHS.iter().map(PathBuf::from).collect(),
            home: None,
            excluded_subdirs: DEFAULT_EXCLUDED_SUBDIRS
                .iter()
                .map(ToString::to_string)
                .collect(),
            relevance_scale: DEFAULT_RELEVANCE_SCALE,
        }
    }
}

impl LocateConfig {
    /// Returns the configured home directory, or the user's home directory.
    pub fn resolved_home(&self) -> Option<PathBuf> {
        self.home.clone().or_else(dirs::home_dir)
    }
}

/// Loads a JSON config file, returning defaults when the file does not exist.
pub fn load_locate_config(path: &Path) -> Result<LocateConfig> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(LocateConfig::default());
    }

    let data = std::fs::read_to_string(path).map_err(|error| {
        LocateError::Config(format!("failed to read {}: {error}", path.display()))
    })?;
    serde_json::from_str(&data).map_err(|error| {
        LocateError::Config(format!("failed to parse {}: {error}", path.display()))
    })
}
