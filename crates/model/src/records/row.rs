use crate::core::value::FieldValue;
use serde::{Deserialize, Serialize};

/// A source row: column name to text value, in source column order.
///
/// Rows are immutable once read. Column names are unique within a row; when
/// a source repeats a header, the later cell wins but the column keeps the
/// position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    field_values: Vec<FieldValue>,
}

impl Row {
    pub fn new(field_values: Vec<FieldValue>) -> Self {
        field_values.into_iter().collect()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.get(field).map(|f| f.value.as_str())
    }

    pub fn field_values(&self) -> &[FieldValue] {
        &self.field_values
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.field_values.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }
}

impl FromIterator<FieldValue> for Row {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let mut field_values: Vec<FieldValue> = Vec::new();
        for field in iter {
            match field_values.iter_mut().find(|f| f.name == field.name) {
                Some(existing) => existing.value = field.value,
                None => field_values.push(field),
            }
        }
        Row { field_values }
    }
}
