use crate::settings::{
    document::{
        AddColumnsSection, ConfigDocument, FilterSection, InputsSection, OutputsSection,
        PathsSection, RunSection, TransformSection,
    },
    error::SettingsError,
    validated::{
        InputSettings, OutputSettings, PathSettings, RunConfig, RunSettings, TransformSettings,
    },
};
use serde_yaml::Value;
use std::path::PathBuf;
use tracing::{debug, info};

const DEFAULT_MODE: &str = "full";

/// Turns a raw [`ConfigDocument`] into a [`RunConfig`].
///
/// Every problem in the document is collected before failing, so a single
/// error lists all missing and malformed fields. Absent optional fields take
/// their defaults; absent required fields are never defaulted.
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn new() -> Self {
        SettingsValidator
    }

    pub fn validate(&self, document: &ConfigDocument) -> Result<RunConfig, SettingsError> {
        let mut errors: Vec<String> = Vec::new();

        let run = self.validate_run(document.run.as_ref(), &mut errors);
        let paths = self.validate_paths(document.paths.as_ref(), &mut errors);
        let inputs = self.validate_inputs(document.inputs.as_ref(), &mut errors);
        let transform = self.validate_transform(document.transform.as_ref(), &mut errors);
        let outputs = self.validate_outputs(document.outputs.as_ref(), &mut errors);

        match (run, paths, inputs, transform, outputs) {
            (Some(run), Some(paths), Some(inputs), Some(transform), Some(outputs))
                if errors.is_empty() =>
            {
                let config = RunConfig {
                    run,
                    paths,
                    inputs,
                    transform,
                    outputs,
                };
                self.log_validated(&config);
                Ok(config)
            }
            _ => Err(SettingsError::ValidationFailed(errors)),
        }
    }

    fn validate_run(
        &self,
        section: Option<&RunSection>,
        errors: &mut Vec<String>,
    ) -> Option<RunSettings> {
        let empty = RunSection::default();
        let section = section.unwrap_or(&empty);

        let name = required_label("run.name", section.name.as_ref(), errors);
        let mode = optional_label("run.mode", section.mode.as_ref(), DEFAULT_MODE, errors);
        let fail_fast = flag(section.fail_fast.as_ref(), true);

        Some(RunSettings {
            name: name?,
            mode: mode?,
            fail_fast,
        })
    }

    fn validate_paths(
        &self,
        section: Option<&PathsSection>,
        errors: &mut Vec<String>,
    ) -> Option<PathSettings> {
        let empty = PathsSection::default();
        let section = section.unwrap_or(&empty);

        let raw_dir = required_path("paths.raw_dir", section.raw_dir.as_ref(), errors);
        let staging_dir = required_path("paths.staging_dir", section.staging_dir.as_ref(), errors);
        let output_dir = required_path("paths.output_dir", section.output_dir.as_ref(), errors);
        let reports_dir = required_path("paths.reports_dir", section.reports_dir.as_ref(), errors);
        let logs_dir = required_path("paths.logs_dir", section.logs_dir.as_ref(), errors);

        Some(PathSettings {
            raw_dir: raw_dir?,
            staging_dir: staging_dir?,
            output_dir: output_dir?,
            reports_dir: reports_dir?,
            logs_dir: logs_dir?,
        })
    }

    fn validate_inputs(
        &self,
        section: Option<&InputsSection>,
        errors: &mut Vec<String>,
    ) -> Option<InputSettings> {
        let empty = InputsSection::default();
        let section = section.unwrap_or(&empty);

        let source_file = required_text("inputs.source_file", section.source_file.as_ref(), errors);
        let expected_columns = required_list(
            "inputs.expected_columns",
            section.expected_columns.as_ref(),
            errors,
        );

        Some(InputSettings {
            source_file: source_file?,
            expected_columns: expected_columns?,
        })
    }

    fn validate_transform(
        &self,
        section: Option<&TransformSection>,
        errors: &mut Vec<String>,
    ) -> Option<TransformSettings> {
        let defaults = TransformSettings::default();
        let empty_filter = FilterSection::default();
        let empty_columns = AddColumnsSection::default();

        let filter = section
            .and_then(|s| s.filter.as_ref())
            .unwrap_or(&empty_filter);
        let add_columns = section
            .and_then(|s| s.add_columns.as_ref())
            .unwrap_or(&empty_columns);

        let min_age = integer(
            "transform.filter.min_age",
            filter.min_age.as_ref(),
            defaults.min_age,
            errors,
        );
        let add_migrated_at_utc = flag(
            add_columns.migrated_at_utc.as_ref(),
            defaults.add_migrated_at_utc,
        );
        let add_run_id = flag(add_columns.run_id.as_ref(), defaults.add_run_id);

        Some(TransformSettings {
            min_age: min_age?,
            add_migrated_at_utc,
            add_run_id,
        })
    }

    fn validate_outputs(
        &self,
        section: Option<&OutputsSection>,
        errors: &mut Vec<String>,
    ) -> Option<OutputSettings> {
        let empty = OutputsSection::default();
        let section = section.unwrap_or(&empty);

        let output_file = required_text("outputs.output_file", section.output_file.as_ref(), errors);
        let report_file = required_text("outputs.report_file", section.report_file.as_ref(), errors);
        let log_file = required_text("outputs.log_file", section.log_file.as_ref(), errors);

        Some(OutputSettings {
            output_file: output_file?,
            report_file: report_file?,
            log_file: log_file?,
        })
    }

    fn log_validated(&self, config: &RunConfig) {
        info!(
            "Run '{}' (mode: {}, fail_fast: {})",
            config.run.name, config.run.mode, config.run.fail_fast
        );
        debug!("  Input: {}", config.input_path().display());
        debug!("  Expected columns: {:?}", config.inputs.expected_columns);
        debug!(
            "  Filter: min_age >= {}; add migrated_at_utc: {}; add run_id: {}",
            config.transform.min_age,
            config.transform.add_migrated_at_utc,
            config.transform.add_run_id
        );
        debug!("  Output: {}", config.output_path().display());
    }
}

fn missing(key: &str, errors: &mut Vec<String>) {
    errors.push(format!("missing required field `{key}`"));
}

fn invalid(key: &str, expected: &str, value: &Value, errors: &mut Vec<String>) {
    errors.push(format!(
        "invalid value for `{key}`: expected {expected}, got {}",
        describe(value)
    ));
}

/// Null counts as absent.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("a value tagged {}", tagged.tag),
        other => scalar_text(other)
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "null".to_string()),
    }
}

/// Run name: any scalar, kept as an opaque string.
fn required_label(key: &str, value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    let Some(value) = present(value) else {
        missing(key, errors);
        return None;
    };
    scalar_text(value).or_else(|| {
        invalid(key, "a string", value, errors);
        None
    })
}

fn optional_label(
    key: &str,
    value: Option<&Value>,
    default: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match present(value) {
        None => Some(default.to_string()),
        Some(value) => scalar_text(value).or_else(|| {
            invalid(key, "a string", value, errors);
            None
        }),
    }
}

/// File and directory names must be written as non-empty strings.
fn required_text(key: &str, value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    let Some(value) = present(value) else {
        missing(key, errors);
        return None;
    };
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        other => {
            invalid(key, "a non-empty string", other, errors);
            None
        }
    }
}

fn required_path(key: &str, value: Option<&Value>, errors: &mut Vec<String>) -> Option<PathBuf> {
    required_text(key, value, errors).map(PathBuf::from)
}

fn required_list(
    key: &str,
    value: Option<&Value>,
    errors: &mut Vec<String>,
) -> Option<Vec<String>> {
    let Some(value) = present(value) else {
        missing(key, errors);
        return None;
    };
    let Value::Sequence(items) = value else {
        invalid(key, "a list of column names", value, errors);
        return None;
    };

    let columns: Option<Vec<String>> = items.iter().map(scalar_text).collect();
    if columns.is_none() {
        invalid(key, "a list of column names", value, errors);
    }
    columns
}

/// Known keywords first, then truthiness: empty strings and collections
/// are false, anything else is true. Never fails.
fn flag(value: Option<&Value>, default: bool) -> bool {
    match present(value) {
        None => default,
        Some(value) => truthy(value),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "false" | "no" | "off" | "0" | "" => false,
            _ => true,
        },
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

/// Integers, integer strings and finite floats (truncated toward zero).
fn integer(
    key: &str,
    value: Option<&Value>,
    default: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let Some(value) = present(value) else {
        return Some(default);
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        invalid(key, "an integer", value, errors);
    }
    parsed
}
