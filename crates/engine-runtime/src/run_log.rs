use crate::error::MigrationError;
use chrono::Utc;
use engine_config::{report::summary::RowCounts, settings::validated::RunSettings};
use model::{core::identifiers::RunId, execution::run::format_utc};
use std::{
    fmt,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Lifecycle events recorded in the run log.
#[derive(Debug, Clone)]
pub enum RunEvent<'a> {
    Start {
        run_name: &'a str,
        mode: &'a str,
        run_id: &'a RunId,
    },
    MissingInput {
        file: &'a Path,
    },
    Success {
        counts: RowCounts,
        report: &'a Path,
    },
}

impl fmt::Display for RunEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Start {
                run_name,
                mode,
                run_id,
            } => write!(f, "START run_name={run_name} mode={mode} run_id={run_id}"),
            RunEvent::MissingInput { file } => {
                write!(f, "FAIL missing_input file={}", file.display())
            }
            RunEvent::Success { counts, report } => write!(
                f,
                "SUCCESS input_rows={} output_rows={} report={}",
                counts.input,
                counts.output,
                report.display()
            ),
        }
    }
}

/// Append-only, line-per-event log shared by every run that points at the
/// same file. Each line starts with the UTC time the event was written.
pub struct RunLogger {
    path: PathBuf,
}

impl RunLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn start(&self, run: &RunSettings, run_id: &RunId) -> Result<(), MigrationError> {
        self.record(&RunEvent::Start {
            run_name: &run.name,
            mode: &run.mode,
            run_id,
        })
    }

    pub fn missing_input(&self, file: &Path) -> Result<(), MigrationError> {
        self.record(&RunEvent::MissingInput { file })
    }

    pub fn success(&self, counts: RowCounts, report: &Path) -> Result<(), MigrationError> {
        self.record(&RunEvent::Success { counts, report })
    }

    /// Opens, appends and closes on every call; the file and its directory
    /// are created on first use and never truncated.
    pub fn record(&self, event: &RunEvent<'_>) -> Result<(), MigrationError> {
        let line = format!("{} {event}\n", format_utc(&Utc::now()));
        self.append(&line).map_err(|source| MigrationError::RunLog {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!("Run log: {}", line.trim_end());
        Ok(())
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
