//! The engine's view of the external index.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::config::LocateConfig;
use crate::error::{LocateError, Result};
use crate::query::LocateQuery;
use crate::runner::{run_locate, LocateCommand};

/// Source of raw lookups and of the index rebuild timestamp.
pub trait LocateBackend {
    /// Streams every path matching `query` into `sink`.
    fn locate(&self, query: &LocateQuery, sink: &mut dyn FnMut(&[u8])) -> Result<()>;

    /// Modification time of the index database.
    fn database_mtime(&self) -> Result<SystemTime>;
}

/// Backend that runs the real `locate` binary.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    command: LocateCommand,
    database_paths: Vec<PathBuf>,
}

impl CommandBackend {
    pub fn new(config: &LocateConfig) -> Self {
        Self {
            command: LocateCommand::from_config(config),
            database_paths: config.database_paths.clone(),
        }
    }
}

impl LocateBackend for CommandBackend {
    fn locate(&self, query: &LocateQuery, sink: &mut dyn FnMut(&[u8])) -> Result<()> {
        run_locate(&self.command, query, sink)
    }

    fn database_mtime(&self) -> Result<SystemTime> {
        database_mtime(&self.database_paths)
    }
}

/// Returns the mtime of the first database path that exists.
pub fn database_mtime(paths: &[PathBuf]) -> Result<SystemTime> {
    for path in paths {
        match fs::metadata(path) {
            Ok(metadata) => return Ok(metadata.modified()?),
            Err(error) => {
                log::trace!("locate database {} unavailable: {error}", path.display());
            }
        }
    }

    let tried = paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(LocateError::DatabaseNotFound(tried))
}
