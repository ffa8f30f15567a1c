use crate::exit::ExitCode;
use engine_runtime::error::{ErrorKind, MigrationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to resolve config path {path}: {source}")]
    ConfigPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CliError {
    /// Every runtime failure exits with the same status; the kind of a
    /// migration error only shows up in diagnostics.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::GeneralError
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CliError::Migration(err) => Some(err.kind()),
            CliError::ConfigPath { .. } | CliError::JsonSerialize(_) => None,
        }
    }
}
