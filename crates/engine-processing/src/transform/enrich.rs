use super::pipeline::Transform;
use model::{
    core::value::FieldValue, execution::run::RunContext, records::transformed::TransformedRow,
};

pub const MIGRATED_AT_COLUMN: &str = "migrated_at_utc";
pub const RUN_ID_COLUMN: &str = "run_id";

/// Appends one column holding the same value on every row.
pub struct AppendField {
    name: String,
    value: String,
}

impl AppendField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn migrated_at(ctx: &RunContext) -> Self {
        Self::new(MIGRATED_AT_COLUMN, ctx.migrated_at_utc())
    }

    pub fn run_id(ctx: &RunContext) -> Self {
        Self::new(RUN_ID_COLUMN, ctx.run_id.as_str())
    }
}

impl Transform for AppendField {
    fn apply(&self, row: &TransformedRow) -> TransformedRow {
        row.with_field(FieldValue::new(self.name.as_str(), self.value.as_str()))
    }
}
