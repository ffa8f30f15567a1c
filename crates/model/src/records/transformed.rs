use crate::{core::value::FieldValue, records::row::Row};
use serde::Serialize;

/// A retained source row plus the enrichment fields appended to it.
///
/// Source columns always come first, enrichment fields follow in the order
/// they were added. Adding a field whose name already exists replaces that
/// value in place instead of duplicating the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedRow {
    field_values: Vec<FieldValue>,
    #[serde(skip)]
    source_len: usize,
}

impl TransformedRow {
    pub fn from_source(source: &Row) -> Self {
        TransformedRow {
            field_values: source.field_values().to_vec(),
            source_len: source.len(),
        }
    }

    /// Returns a new row with `field` added; `self` is left untouched.
    pub fn with_field(&self, field: FieldValue) -> Self {
        let mut next = self.clone();
        match next.field_values.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => existing.value = field.value,
            None => next.field_values.push(field),
        }
        next
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.field_values
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.value.as_str())
    }

    pub fn field_values(&self) -> &[FieldValue] {
        &self.field_values
    }

    pub fn enrichment(&self) -> &[FieldValue] {
        &self.field_values[self.source_len..]
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.field_values.iter().map(|f| f.name.as_str())
    }
}
