use crate::{error::CliError, exit::ExitCode};
use clap::Parser;
use engine_runtime::execution::executor;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod error;
mod exit;
mod output;

#[derive(Parser)]
#[command(
    name = "stratum-migrate",
    version,
    about = "Run a configuration-driven CSV migration"
)]
struct Cli {
    /// Path to the YAML run configuration
    config: PathBuf,
}

fn main() -> std::process::ExitCode {
    // Diagnostics go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also land here, on stdout.
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::Usage
            } else {
                ExitCode::Success
            };
            return code.into();
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            if let Some(kind) = err.kind() {
                debug!("Failure kind: {kind:?}");
            }
            eprintln!("ERROR: {err}");
            err.exit_code().into()
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config_path =
        std::path::absolute(&cli.config).map_err(|source| CliError::ConfigPath {
            path: cli.config.display().to_string(),
            source,
        })?;
    info!("Using configuration {}", config_path.display());

    let report = executor::run(&config_path)?;
    output::print_report(&report)
}
