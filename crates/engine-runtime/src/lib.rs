pub mod error;
pub mod execution;
pub mod run_log;
