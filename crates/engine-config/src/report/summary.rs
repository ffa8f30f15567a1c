use crate::{report::finding::Finding, settings::validated::RunConfig};
use model::execution::run::RunContext;
use serde::{Deserialize, Serialize};

/// The one structured record written per successful run.
///
/// Field order here is the field order of the written document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_name: String,
    pub mode: String,
    pub run_id: String,
    pub migrated_at_utc: String,
    pub input_file: String,
    pub staging_file: String,
    pub output_file: String,
    pub input_rows: usize,
    pub output_rows: usize,
    pub headers_seen: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

/// Row counts observed by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub input: usize,
    pub output: usize,
}

impl RunReport {
    pub fn new(
        config: &RunConfig,
        ctx: &RunContext,
        counts: RowCounts,
        headers_seen: Vec<String>,
        findings: Vec<Finding>,
    ) -> Self {
        RunReport {
            run_name: config.run.name.clone(),
            mode: config.run.mode.clone(),
            run_id: ctx.run_id.to_string(),
            migrated_at_utc: ctx.migrated_at_utc(),
            input_file: config.input_path().display().to_string(),
            staging_file: config.staging_path().display().to_string(),
            output_file: config.output_path().display().to_string(),
            input_rows: counts.input,
            output_rows: counts.output,
            headers_seen,
            findings,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::parse;
    use chrono::{TimeZone, Utc};
    use model::core::identifiers::RunId;

    const CONFIG: &str = r#"
run: { name: nightly }
paths:
  raw_dir: raw
  staging_dir: staging
  output_dir: out
  reports_dir: reports
  logs_dir: logs
inputs: { source_file: people.csv, expected_columns: [id, age] }
outputs: { output_file: people_out.csv, report_file: report.json, log_file: run.log }
"#;

    fn report(findings: Vec<Finding>) -> RunReport {
        let config = parse(CONFIG).unwrap();
        let ctx = RunContext::new(
            RunId::from("run-42"),
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        );
        RunReport::new(
            &config,
            &ctx,
            RowCounts { input: 3, output: 2 },
            vec!["id".into(), "age".into()],
            findings,
        )
    }

    #[test]
    fn fills_fields_from_config_and_context() {
        let report = report(vec![]);

        assert_eq!(report.run_name, "nightly");
        assert_eq!(report.mode, "full");
        assert_eq!(report.run_id, "run-42");
        assert_eq!(report.migrated_at_utc, "2024-01-02T03:04:05.000000+00:00");
        assert!(report.staging_file.ends_with("staged_people.csv"));
        assert_eq!(report.input_rows, 3);
        assert_eq!(report.output_rows, 2);
    }

    #[test]
    fn serializes_in_declared_order_without_empty_findings() {
        let json = report(vec![]).to_json_pretty().unwrap();

        let keys: Vec<&str> = json
            .lines()
            .filter_map(|line| line.strip_prefix("  \""))
            .filter_map(|line| line.split('"').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "run_name",
                "mode",
                "run_id",
                "migrated_at_utc",
                "input_file",
                "staging_file",
                "output_file",
                "input_rows",
                "output_rows",
                "headers_seen",
            ]
        );
    }

    #[test]
    fn includes_findings_when_present() {
        let json = report(vec![Finding::extra_column("nickname")])
            .to_json_pretty()
            .unwrap();
        assert!(json.contains("\"findings\""));
    }
}
