use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when no Steam installation can be located.
pub const EXIT_STEAM_NOT_FOUND: i32 = 2;

#[derive(Debug, Error)]
pub enum MonitorError {
    // Environment
    #[error("Steam installation not found (searched {} location(s))", searched.len())]
    SteamNotFound { searched: Vec<PathBuf> },

    // Transient reads
    #[error("failed to read log file {path}: {source}")]
    ReadLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Process plumbing
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl MonitorError {
    pub fn read_log(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadLog {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for an error that ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SteamNotFound { .. } => EXIT_STEAM_NOT_FOUND,
            _ => 1,
        }
    }
}
