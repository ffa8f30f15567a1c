use engine_config::{report::summary::RunReport, settings};
use engine_runtime::{error::MigrationError, execution::executor};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Knobs for a generated run configuration. Everything else is fixed.
pub struct FixtureOptions<'a> {
    pub expected_columns: &'a [&'a str],
    pub fail_fast: bool,
    pub min_age: i64,
    pub add_migrated_at_utc: bool,
    pub add_run_id: bool,
}

impl Default for FixtureOptions<'_> {
    fn default() -> Self {
        FixtureOptions {
            expected_columns: &["id", "age"],
            fail_fast: true,
            min_age: 18,
            add_migrated_at_utc: true,
            add_run_id: true,
        }
    }
}

/// A throwaway directory tree holding one config file and its input.
pub struct Fixture {
    dir: TempDir,
    config_path: PathBuf,
}

impl Fixture {
    pub fn new(options: FixtureOptions) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().display().to_string();
        let expected = options
            .expected_columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");

        let config = format!(
            r#"
run:
  name: fixture_run
  mode: full
  fail_fast: {fail_fast}
paths:
  raw_dir: "{root}/raw"
  staging_dir: "{root}/staging"
  output_dir: "{root}/output"
  reports_dir: "{root}/reports"
  logs_dir: "{root}/logs"
inputs:
  source_file: people.csv
  expected_columns: [{expected}]
transform:
  filter:
    min_age: {min_age}
  add_columns:
    migrated_at_utc: {add_migrated_at_utc}
    run_id: {add_run_id}
outputs:
  output_file: people_out.csv
  report_file: report.json
  log_file: migration.log
"#,
            fail_fast = options.fail_fast,
            min_age = options.min_age,
            add_migrated_at_utc = options.add_migrated_at_utc,
            add_run_id = options.add_run_id,
        );

        let config_path = dir.path().join("config.yaml");
        fs::write(&config_path, config).expect("write config");
        Fixture { dir, config_path }
    }

    pub fn with_input(options: FixtureOptions, csv: &str) -> Self {
        let fixture = Self::new(options);
        fixture.write_input(csv);
        fixture
    }

    pub fn write_input(&self, csv: &str) {
        let raw = self.root().join("raw");
        fs::create_dir_all(&raw).expect("create raw dir");
        fs::write(raw.join("people.csv"), csv).expect("write input");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn run(&self) -> Result<RunReport, MigrationError> {
        executor::run(&self.config_path)
    }

    pub fn staging_file(&self) -> PathBuf {
        self.root().join("staging").join("staged_people.csv")
    }

    pub fn output_file(&self) -> PathBuf {
        self.root().join("output").join("people_out.csv")
    }

    pub fn report_file(&self) -> PathBuf {
        self.root().join("reports").join("report.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root().join("logs").join("migration.log")
    }

    pub fn log_lines(&self) -> Vec<String> {
        fs::read_to_string(self.log_file())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Parses the written report document back into a `RunReport`.
    pub fn written_report(&self) -> RunReport {
        let json = fs::read_to_string(self.report_file()).expect("read report");
        serde_json::from_str(&json).expect("parse report")
    }

    pub fn loaded_config(&self) -> settings::validated::RunConfig {
        settings::load(&self.config_path).expect("load fixture config")
    }
}

/// Reads a written CSV file into its header and records.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader
        .headers()
        .expect("read headers")
        .iter()
        .map(str::to_string)
        .collect();
    let records = reader
        .records()
        .map(|r| r.expect("read record").iter().map(str::to_string).collect())
        .collect();
    (headers, records)
}

/// Index of `column` in `headers`, panicking with the headers when absent.
pub fn column_index(headers: &[String], column: &str) -> usize {
    headers
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("column `{column}` not in {headers:?}"))
}
