use crate::{error::MigrationError, execution::state::RunState, run_log::RunLogger};
use connectors::file::{
    csv::{error::FileError, source::CsvDataSource, writer},
    json,
};
use engine_config::{
    report::summary::{RowCounts, RunReport},
    settings::{
        self,
        validated::{PathSettings, RunConfig},
    },
    validation::schema_validator::{SchemaPolicy, SchemaValidator},
};
use engine_processing::transform::RowTransformer;
use model::execution::run::RunContext;
use std::{fs, path::Path};
use tracing::{debug, error, info, warn};

/// Loads the configuration at `config_path` and performs one run with a
/// fresh run id and timestamp.
pub fn run(config_path: &Path) -> Result<RunReport, MigrationError> {
    debug!("Run state: {}", RunState::Init);
    let config = settings::load(config_path)?;
    execute(&config, RunContext::start())
}

/// Performs one run of an already loaded configuration.
///
/// Steps run strictly in order and the first failure ends the run. Anything
/// written before that point is left in place.
pub fn execute(config: &RunConfig, ctx: RunContext) -> Result<RunReport, MigrationError> {
    let mut executor = MigrationExecutor::new(config, ctx);
    let result = executor.drive();
    if let Err(err) = &result {
        error!("Run '{}' failed after {}: {err}", config.run.name, executor.state);
        debug!("Run state: {} -> {}", executor.state, RunState::Failed);
    }
    result
}

/// Creates every configured directory. Must succeed before any file I/O.
pub fn bootstrap(paths: &PathSettings) -> Result<(), MigrationError> {
    for dir in paths.all() {
        fs::create_dir_all(dir).map_err(|source| MigrationError::Bootstrap {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

struct MigrationExecutor<'a> {
    config: &'a RunConfig,
    ctx: RunContext,
    logger: RunLogger,
    state: RunState,
}

impl<'a> MigrationExecutor<'a> {
    fn new(config: &'a RunConfig, ctx: RunContext) -> Self {
        Self {
            config,
            ctx,
            logger: RunLogger::new(config.log_path()),
            state: RunState::ConfigLoaded,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            debug!("Run state: {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn drive(&mut self) -> Result<RunReport, MigrationError> {
        let config = self.config;

        bootstrap(&config.paths)?;
        self.advance();

        info!("Migration run ID: {}", self.ctx.run_id);
        self.logger.start(&config.run, &self.ctx.run_id)?;

        let input_path = config.input_path();
        let source = match CsvDataSource::open(&input_path) {
            Ok(source) => source,
            Err(FileError::NotFound(path)) => {
                if let Err(log_err) = self.logger.missing_input(&input_path) {
                    warn!("Could not record missing input in run log: {log_err}");
                }
                return Err(MigrationError::InputMissing(path));
            }
            Err(err) => return Err(err.into()),
        };

        let dataset = source.read_all()?;
        let policy = SchemaPolicy::from_fail_fast(config.run.fail_fast);
        let check = SchemaValidator::new(&config.inputs.expected_columns, policy)
            .validate(&input_path, &dataset.headers)?;
        self.advance();

        let transformed = RowTransformer::new(&config.transform, &self.ctx).transform(&dataset.rows);
        self.advance();

        // Staging and output carry identical content for now.
        let staging_path = config.staging_path();
        let output_path = config.output_path();
        writer::write_rows(&staging_path, &transformed)?;
        writer::write_rows(&output_path, &transformed)?;
        info!(
            "Wrote {} rows to {} and {}",
            transformed.len(),
            staging_path.display(),
            output_path.display()
        );
        self.advance();

        let counts = RowCounts {
            input: dataset.row_count(),
            output: transformed.len(),
        };
        let report = RunReport::new(
            config,
            &self.ctx,
            counts,
            check.headers.clone(),
            check.findings(&input_path),
        );
        let report_path = config.report_path();
        json::write_document(&report_path, &report)?;
        self.advance();

        self.logger.success(counts, &report_path)?;
        self.advance();

        info!(
            "Run '{}' complete: {} of {} rows migrated",
            config.run.name, counts.output, counts.input
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_config::settings::parse;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    fn config_in(root: &Path, fail_fast: bool) -> RunConfig {
        let yaml = format!(
            r#"
run:
  name: unit
  fail_fast: {fail_fast}
paths:
  raw_dir: {root}/raw
  staging_dir: {root}/staging
  output_dir: {root}/out
  reports_dir: {root}/reports
  logs_dir: {root}/logs
inputs:
  source_file: people.csv
  expected_columns: [id, age]
outputs:
  output_file: people_out.csv
  report_file: report.json
  log_file: run.log
"#,
            root = root.display()
        );
        parse(&yaml).unwrap()
    }

    #[test]
    fn bootstrap_creates_all_directories() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), true);

        bootstrap(&config.paths).unwrap();

        for path in config.paths.all() {
            assert!(path.is_dir(), "{} should exist", path.display());
        }
    }

    #[test]
    #[traced_test]
    fn missing_input_is_logged_and_reported() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), true);

        let err = execute(&config, RunContext::start()).unwrap_err();

        assert!(matches!(err, MigrationError::InputMissing(_)));
        let log = fs::read_to_string(config.log_path()).unwrap();
        assert!(log.contains(" START run_name=unit mode=full run_id="));
        assert!(log.contains(" FAIL missing_input file="));
        assert!(!log.contains("SUCCESS"));
        assert!(logs_contain("Run 'unit' failed after DirsReady"));
        assert!(logs_contain("Run state: DirsReady -> Failed"));
    }

    #[test]
    fn successful_run_returns_report() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), true);
        bootstrap(&config.paths).unwrap();
        fs::write(config.input_path(), "id,age\n1,30\n2,abc\n").unwrap();

        let ctx = RunContext::start();
        let report = execute(&config, ctx.clone()).unwrap();

        assert_eq!(report.run_id, ctx.run_id.as_str());
        assert_eq!(report.input_rows, 2);
        assert_eq!(report.output_rows, 1);
        assert!(config.report_path().exists());
        assert_eq!(
            fs::read(config.staging_path()).unwrap(),
            fs::read(config.output_path()).unwrap()
        );
    }
}
