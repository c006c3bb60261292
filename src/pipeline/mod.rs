//! End-to-end run: scan, catalog, sequence, report, write

mod error;
mod orchestrator;

pub use error::{PipelineError, EXIT_DISCOVERY, EXIT_OK, EXIT_OUTPUT, EXIT_USAGE};
pub use orchestrator::{Analysis, PipelineOrchestrator, RunSummary, REPORT_FILE_NAME};
