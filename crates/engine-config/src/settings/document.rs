use crate::settings::error::SettingsError;
use serde::Deserialize;
use serde_yaml::Value;

/// The configuration document as written, before any validation.
///
/// Leaf values stay untyped so the validator can apply its own coercion
/// rules and report every problem at once.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigDocument {
    pub run: Option<RunSection>,
    pub paths: Option<PathsSection>,
    pub inputs: Option<InputsSection>,
    pub transform: Option<TransformSection>,
    pub outputs: Option<OutputsSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunSection {
    pub name: Option<Value>,
    pub mode: Option<Value>,
    pub fail_fast: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    pub raw_dir: Option<Value>,
    pub staging_dir: Option<Value>,
    pub output_dir: Option<Value>,
    pub reports_dir: Option<Value>,
    pub logs_dir: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InputsSection {
    pub source_file: Option<Value>,
    pub expected_columns: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransformSection {
    pub filter: Option<FilterSection>,
    pub add_columns: Option<AddColumnsSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterSection {
    pub min_age: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddColumnsSection {
    pub migrated_at_utc: Option<Value>,
    pub run_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputsSection {
    pub output_file: Option<Value>,
    pub report_file: Option<Value>,
    pub log_file: Option<Value>,
}

impl ConfigDocument {
    /// An empty document parses to a document with every section missing.
    pub fn from_yaml(source: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_yaml::from_str(source)?;
        if value.is_null() {
            return Ok(ConfigDocument::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }
}
