use crate::settings::{
    document::ConfigDocument, error::SettingsError, validated::RunConfig,
    validator::SettingsValidator,
};
use std::path::Path;
use tracing::info;

pub mod document;
pub mod error;
pub mod validated;
pub mod validator;

/// Reads and validates the configuration document at `path`.
///
/// Nothing is created on disk; see the executor's bootstrap step for that.
pub fn load(path: &Path) -> Result<RunConfig, SettingsError> {
    if !path.exists() {
        return Err(SettingsError::NotFound(path.display().to_string()));
    }

    let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config = parse(&source)?;
    info!(
        "Loaded configuration for run '{}' from {}",
        config.run.name,
        path.display()
    );
    Ok(config)
}

/// Parses and validates a YAML configuration document.
pub fn parse(source: &str) -> Result<RunConfig, SettingsError> {
    let document = ConfigDocument::from_yaml(source)?;
    SettingsValidator::new().validate(&document)
}
