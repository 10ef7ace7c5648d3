use super::metadata::log_version_info;
use super::profiling::setup_logging_and_profiling;
use crate::app::{self, settings::Settings};
use std::process::ExitCode;

// === Entry point for the command line ===
pub fn main() -> ExitCode {
    let settings = Settings::from_cli();

    // Keep the guard alive until the end so the trace file is flushed
    let _logging = setup_logging_and_profiling(settings.trace_file.as_deref());
    log_version_info();

    match app::run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
