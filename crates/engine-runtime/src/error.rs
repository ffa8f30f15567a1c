use connectors::file::csv::error::FileError;
use engine_config::{settings::error::SettingsError, validation::error::SchemaError};
use thiserror::Error;

/// Top‐level errors for a migration run.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to create directory {path}: {source}")]
    Bootstrap {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found: {0}")]
    InputMissing(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Reading the input or writing an output failed.
    #[error(transparent)]
    File(#[from] FileError),

    #[error("Failed to append to run log {path}: {source}")]
    RunLog {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification used to pick a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    InputMissing,
    Schema,
    Io,
}

impl MigrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrationError::Settings(_) => ErrorKind::Config,
            MigrationError::InputMissing(_) => ErrorKind::InputMissing,
            MigrationError::File(FileError::NotFound(_)) => ErrorKind::InputMissing,
            MigrationError::Schema(_) => ErrorKind::Schema,
            MigrationError::Bootstrap { .. }
            | MigrationError::File(_)
            | MigrationError::RunLog { .. } => ErrorKind::Io,
        }
    }
}
