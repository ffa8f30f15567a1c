use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal observation recorded in the run report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    pub code: String,    // stable programmatic id
    pub message: String, // human-readable
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>, // how to fix
}

const CODE_COLUMN_MISSING: &str = "SCHEMA_COLUMN_MISSING";
const CODE_EXTRA_COLUMN: &str = "SCHEMA_EXTRA_COLUMN";

impl Finding {
    pub fn new(code: &str, message: String, severity: Severity, suggestion: Option<String>) -> Self {
        Finding {
            code: code.to_string(),
            message,
            severity,
            suggestion,
        }
    }

    /// An expected column the input lacks, tolerated because fail-fast is off.
    pub fn missing_column(column: &str, input_path: &Path) -> Self {
        Self::new(
            CODE_COLUMN_MISSING,
            format!(
                "Expected column `{column}` is missing from {}; rows were migrated without it.",
                input_path.display()
            ),
            Severity::Warning,
            Some("Add the column to the input or remove it from `inputs.expected_columns`.".into()),
        )
    }

    pub fn extra_column(column: &str) -> Self {
        Self::new(
            CODE_EXTRA_COLUMN,
            format!("Column `{column}` is not in the expected set and was passed through."),
            Severity::Info,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_empty_suggestion() {
        let json = serde_json::to_value(Finding::extra_column("nickname")).unwrap();

        assert_eq!(json["code"], "SCHEMA_EXTRA_COLUMN");
        assert_eq!(json["severity"], "info");
        assert!(json.get("suggestion").is_none());
    }
}
