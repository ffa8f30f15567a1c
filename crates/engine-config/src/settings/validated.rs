use std::path::{Path, PathBuf};

/// Immutable, validated configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub run: RunSettings,
    pub paths: PathSettings,
    pub inputs: InputSettings,
    pub transform: TransformSettings,
    pub outputs: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub name: String,
    /// Opaque label, recorded in the log and report only.
    pub mode: String,
    pub fail_fast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSettings {
    pub raw_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSettings {
    pub source_file: String,
    pub expected_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformSettings {
    pub min_age: i64,
    pub add_migrated_at_utc: bool,
    pub add_run_id: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        TransformSettings {
            min_age: 0,
            add_migrated_at_utc: true,
            add_run_id: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub output_file: String,
    pub report_file: String,
    pub log_file: String,
}

impl PathSettings {
    /// Every directory the run touches, in bootstrap order.
    pub fn all(&self) -> [&Path; 5] {
        [
            &self.raw_dir,
            &self.staging_dir,
            &self.output_dir,
            &self.reports_dir,
            &self.logs_dir,
        ]
    }
}

impl RunConfig {
    pub fn input_path(&self) -> PathBuf {
        self.paths.raw_dir.join(&self.inputs.source_file)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.paths
            .staging_dir
            .join(format!("staged_{}", self.inputs.source_file))
    }

    pub fn output_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.outputs.output_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.paths.reports_dir.join(&self.outputs.report_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.paths.logs_dir.join(&self.outputs.log_file)
    }
}
