use crate::transform::{
    enrich::AppendField,
    filter::MinAgeFilter,
    pipeline::{TransformPipeline, TransformPipelineExt},
};
use engine_config::settings::validated::TransformSettings;
use model::{
    execution::run::RunContext,
    records::{row::Row, transformed::TransformedRow},
};
use tracing::info;

pub mod enrich;
pub mod filter;
pub mod pipeline;

/// Applies the configured age filter and enrichment to a row set.
///
/// Enrichment order is fixed: `migrated_at_utc`, then `run_id`. Both carry
/// the single value from the run context, so every row of a run shares them.
pub struct RowTransformer {
    pipeline: TransformPipeline,
}

impl RowTransformer {
    pub fn new(settings: &TransformSettings, ctx: &RunContext) -> Self {
        let pipeline = TransformPipeline::new()
            .add_filter(MinAgeFilter::new(settings.min_age))
            .add_if(settings.add_migrated_at_utc, || AppendField::migrated_at(ctx))
            .add_if(settings.add_run_id, || AppendField::run_id(ctx));

        Self { pipeline }
    }

    /// Never fails: rows with unusable data are filtered, not rejected.
    pub fn transform(&self, rows: &[Row]) -> Vec<TransformedRow> {
        let out = self.pipeline.run(rows);
        info!("Transformed {} rows, {} retained", rows.len(), out.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use model::core::{identifiers::RunId, value::FieldValue};

    fn ctx() -> RunContext {
        RunContext::new(
            RunId::from("7f9c7c36-run"),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        )
    }

    fn person(id: &str, age: &str) -> Row {
        Row::new(vec![FieldValue::new("id", id), FieldValue::new("age", age)])
    }

    fn settings(min_age: i64, add_ts: bool, add_id: bool) -> TransformSettings {
        TransformSettings {
            min_age,
            add_migrated_at_utc: add_ts,
            add_run_id: add_id,
        }
    }

    #[test]
    fn enriches_retained_rows_in_fixed_order() {
        let transformer = RowTransformer::new(&settings(18, true, true), &ctx());

        let out = transformer.transform(&[person("1", "30")]);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].columns().collect::<Vec<_>>(),
            vec!["id", "age", "migrated_at_utc", "run_id"]
        );
        assert_eq!(
            out[0].get_value("migrated_at_utc"),
            Some("2024-06-01T08:00:00.000000+00:00")
        );
        assert_eq!(out[0].get_value("run_id"), Some("7f9c7c36-run"));
    }

    #[test]
    fn enrichment_is_shared_across_rows() {
        let transformer = RowTransformer::new(&settings(0, true, true), &ctx());

        let out = transformer.transform(&[person("1", "30"), person("2", "40"), person("3", "50")]);

        assert_eq!(out.len(), 3);
        for row in &out[1..] {
            assert_eq!(row.get_value("run_id"), out[0].get_value("run_id"));
            assert_eq!(
                row.get_value("migrated_at_utc"),
                out[0].get_value("migrated_at_utc")
            );
        }
    }

    #[test]
    fn each_enrichment_toggles_independently() {
        let only_id = RowTransformer::new(&settings(0, false, true), &ctx());
        let out = only_id.transform(&[person("1", "30")]);
        assert_eq!(out[0].columns().collect::<Vec<_>>(), vec!["id", "age", "run_id"]);

        let only_ts = RowTransformer::new(&settings(0, true, false), &ctx());
        let out = only_ts.transform(&[person("1", "30")]);
        assert_eq!(
            out[0].columns().collect::<Vec<_>>(),
            vec!["id", "age", "migrated_at_utc"]
        );

        let none = RowTransformer::new(&settings(0, false, false), &ctx());
        let out = none.transform(&[person("1", "30")]);
        assert!(out[0].enrichment().is_empty());
    }

    #[test]
    fn unparsable_age_depends_on_threshold() {
        let rows = [person("1", "abc")];

        let default = RowTransformer::new(&settings(0, false, false), &ctx());
        assert!(default.transform(&rows).is_empty());

        let negative = RowTransformer::new(&settings(-5, false, false), &ctx());
        assert_eq!(negative.transform(&rows).len(), 1);
    }

    #[test]
    fn counts_rows_at_or_above_threshold() {
        let rows = [
            person("1", "17"),
            person("2", "18"),
            person("3", " 19 "),
            person("4", ""),
            person("5", "-1"),
        ];
        let transformer = RowTransformer::new(&settings(18, false, false), &ctx());

        let ids: Vec<_> = transformer
            .transform(&rows)
            .iter()
            .map(|r| r.get_value("id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn source_rows_are_not_modified() {
        let rows = [person("1", "30")];
        let transformer = RowTransformer::new(&settings(0, true, true), &ctx());

        transformer.transform(&rows);

        assert_eq!(rows[0], person("1", "30"));
    }
}
