use crate::{report::finding::Finding, validation::error::SchemaError};
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Any missing expected column aborts the run.
    FailFast,
    /// Missing columns are reported; rows simply lack those fields.
    Lenient,
}

impl SchemaPolicy {
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            SchemaPolicy::FailFast
        } else {
            SchemaPolicy::Lenient
        }
    }
}

/// Outcome of a header check that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCheck {
    /// The header line exactly as observed.
    pub headers: Vec<String>,
    /// Expected but absent, in expected order.
    pub missing: Vec<String>,
    /// Present but not expected, in header order. Always tolerated.
    pub extra: Vec<String>,
}

impl SchemaCheck {
    pub fn findings(&self, input_path: &Path) -> Vec<Finding> {
        self.missing
            .iter()
            .map(|col| Finding::missing_column(col, input_path))
            .chain(self.extra.iter().map(|col| Finding::extra_column(col)))
            .collect()
    }
}

/// Compares observed input headers against the expected column list.
pub struct SchemaValidator<'a> {
    expected: &'a [String],
    policy: SchemaPolicy,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(expected: &'a [String], policy: SchemaPolicy) -> Self {
        Self { expected, policy }
    }

    /// Works from the header line alone, so inputs without data rows are
    /// checked the same way as any other.
    pub fn validate(
        &self,
        input_path: &Path,
        headers: &[String],
    ) -> Result<SchemaCheck, SchemaError> {
        let missing: Vec<String> = self
            .expected
            .iter()
            .filter(|col| !headers.contains(col))
            .cloned()
            .collect();
        let extra: Vec<String> = headers
            .iter()
            .filter(|col| !self.expected.contains(col))
            .cloned()
            .collect();

        if !missing.is_empty() {
            match self.policy {
                SchemaPolicy::FailFast => {
                    return Err(SchemaError::MissingColumns {
                        missing,
                        path: input_path.display().to_string(),
                        headers: headers.to_vec(),
                    });
                }
                SchemaPolicy::Lenient => {
                    warn!(
                        "Missing expected columns {:?} in {}; continuing because fail_fast is disabled",
                        missing,
                        input_path.display()
                    );
                }
            }
        }

        if !extra.is_empty() {
            info!("Passing through unexpected columns {:?}", extra);
        }

        Ok(SchemaCheck {
            headers: headers.to_vec(),
            missing,
            extra,
        })
    }
}
