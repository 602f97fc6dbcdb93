use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while running the bootstrap script, one variant per stage.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to read SQL script {}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to connect to {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    #[error("SQL script failed")]
    Execute(#[source] sqlx::Error),

    #[error("Failed to close database connection")]
    Close(#[source] sqlx::Error),

    #[error("Failed to write progress output")]
    Progress(#[source] io::Error),
}

impl BootstrapError {
    /// Stage name used in logs
    pub fn phase(&self) -> &'static str {
        match self {
            Self::ReadScript { .. } => "read_script",
            Self::Connect { .. } => "connect",
            Self::Execute(_) => "execute",
            Self::Close(_) => "close",
            Self::Progress(_) => "progress",
        }
    }
}
