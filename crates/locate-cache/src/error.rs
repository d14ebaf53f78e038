use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index tool ran but exited non-zero or was killed by a signal.
    #[error("locate failed with status {0}")]
    ToolFailed(ExitStatus),

    #[error("no locate database found (tried {0})")]
    DatabaseNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl LocateError {
    /// Whether the error means "the index answered badly" rather than an OS failure.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, Self::ToolFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, LocateError>;
