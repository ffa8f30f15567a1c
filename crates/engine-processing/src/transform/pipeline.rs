use model::records::{row::Row, transformed::TransformedRow};
use std::sync::Arc;

/// Decides whether a source row continues through the pipeline.
pub trait Filter: Send + Sync {
    fn should_keep(&self, row: &Row) -> bool;
}

/// Produces a new row from an existing one; never mutates its input.
pub trait Transform: Send + Sync {
    fn apply(&self, row: &TransformedRow) -> TransformedRow;
}

pub trait TransformPipelineExt {
    fn add_if<T, F>(self, condition: bool, factory: F) -> Self
    where
        T: Transform + 'static,
        F: FnOnce() -> T;
}

/// Filters run first, against the untouched source row; transforms then
/// run in insertion order on the rows that survived.
#[derive(Clone)]
pub struct TransformPipeline {
    filters: Vec<Arc<dyn Filter>>,
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn apply(&self, row: &Row) -> Option<TransformedRow> {
        if !self.filters.iter().all(|filter| filter.should_keep(row)) {
            return None;
        }
        let start = TransformedRow::from_source(row);
        Some(
            self.transforms
                .iter()
                .fold(start, |acc, transform| transform.apply(&acc)),
        )
    }

    pub fn run(&self, rows: &[Row]) -> Vec<TransformedRow> {
        rows.iter().filter_map(|row| self.apply(row)).collect()
    }

    pub fn add_filter<T: Filter + 'static>(mut self, filter: T) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn add_transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }
}

impl TransformPipelineExt for TransformPipeline {
    fn add_if<T, F>(mut self, condition: bool, factory: F) -> Self
    where
        T: Transform + 'static,
        F: FnOnce() -> T,
    {
        if condition {
            self = self.add_transform(factory());
        }
        self
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::FieldValue;

    struct KeepIds(&'static [&'static str]);

    impl Filter for KeepIds {
        fn should_keep(&self, row: &Row) -> bool {
            row.get_value("id").is_some_and(|id| self.0.contains(&id))
        }
    }

    struct Tag(&'static str);

    impl Transform for Tag {
        fn apply(&self, row: &TransformedRow) -> TransformedRow {
            let seen = row.get_value("tags").unwrap_or_default();
            row.with_field(FieldValue::new("tags", format!("{seen}{}", self.0)))
        }
    }

    fn row(id: &str) -> Row {
        Row::new(vec![FieldValue::new("id", id)])
    }

    #[test]
    fn empty_pipeline_passes_rows_through() {
        let out = TransformPipeline::default().run(&[row("1"), row("2")]);
        assert_eq!(out.len(), 2);
        assert!(out[0].enrichment().is_empty());
    }

    #[test]
    fn filters_drop_rows_before_transforms() {
        let pipeline = TransformPipeline::new()
            .add_filter(KeepIds(&["2"]))
            .add_transform(Tag("a"));

        let out = pipeline.run(&[row("1"), row("2")]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get_value("id"), Some("2"));
    }

    #[test]
    fn transforms_apply_in_order_and_add_if_skips_disabled() {
        let pipeline = TransformPipeline::new()
            .add_transform(Tag("a"))
            .add_if(false, || Tag("b"))
            .add_if(true, || Tag("c"));

        let out = pipeline.apply(&row("1")).unwrap();
        assert_eq!(out.get_value("tags"), Some("ac"));
    }
}
