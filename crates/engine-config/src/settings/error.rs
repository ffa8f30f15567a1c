use thiserror::Error;

/// Errors raised while loading or validating the run configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML or a section has the wrong shape.
    #[error("Failed to parse configuration document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// One entry per missing or unusable field.
    #[error("Invalid configuration: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
