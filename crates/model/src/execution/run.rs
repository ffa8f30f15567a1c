use crate::core::identifiers::RunId;
use chrono::{DateTime, SecondsFormat, Utc};

/// Per-run metadata shared by every component of a single run.
///
/// Created once by the executor and passed explicitly; there is no
/// process-wide "current run".
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub migrated_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new(run_id: RunId, migrated_at: DateTime<Utc>) -> Self {
        RunContext {
            run_id,
            migrated_at,
        }
    }

    /// Fresh id, current UTC time.
    pub fn start() -> Self {
        Self::new(RunId::generate(), Utc::now())
    }

    /// The migration timestamp as written to rows and the report,
    /// e.g. `2024-05-01T12:00:00.123456+00:00`.
    pub fn migrated_at_utc(&self) -> String {
        format_utc(&self.migrated_at)
    }
}

/// ISO-8601 with microseconds and an explicit `+00:00` offset.
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}
