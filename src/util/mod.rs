//! Shared helpers

pub mod logging;

pub use logging::{init_logging, InvalidLogLevel, LoggingConfig};
