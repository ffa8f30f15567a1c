use crate::error::CliError;
use engine_config::report::summary::RunReport;

/// Echoes the final report to stdout.
pub fn print_report(report: &RunReport) -> Result<(), CliError> {
    let report_json = report.to_json_pretty()?;
    println!("{report_json}");
    Ok(())
}
