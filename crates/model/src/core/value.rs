use serde::{Deserialize, Serialize};

/// A single named cell. Values are kept verbatim as text; no typing is
/// applied when reading tabular input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldValue {
            name: name.into(),
            value: value.into(),
        }
    }
}
