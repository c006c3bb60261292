//! Progress reporting for pipeline runs

mod handler;
mod logging;

pub use handler::{ProgressEvent, ProgressHandler, Stage};
pub use logging::LoggingHandler;
