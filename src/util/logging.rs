//! Structured logging setup
//!
//! Logs go to stderr so that stdout stays clean for catalog and report output.
//! The level comes from `PHASEPLAN_LOG_LEVEL` (or the CLI), and `RUST_LOG`
//! directives are honored on top of it. An unknown level name is an error.
//!
//! ```no_run
//! use phaseplan::util::logging;
//!
//! let config = logging::config_from_env()?;
//! logging::init_logging(config);
//! tracing::info!(root = "/lab", "Scan started");
//! # Ok::<(), logging::InvalidLogLevel>(())
//! ```

use std::env;
use std::sync::Once;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "PHASEPLAN_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "PHASEPLAN_LOG_JSON";

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid log level '{0}'. Valid levels: trace, debug, info, warn, error")]
pub struct InvalidLogLevel(pub String);

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's own events
    pub level: Level,

    /// Emit one JSON object per event
    pub use_json: bool,

    /// Include the module target (e.g. `phaseplan::scan`)
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn json(mut self, use_json: bool) -> Self {
        self.use_json = use_json;
        self
    }
}

/// Parses a level name, case-insensitively
pub fn parse_level(level_str: &str) -> Result<Level, InvalidLogLevel> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(InvalidLogLevel(level_str.to_string())),
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    match format!("{}={}", crate::NAME, level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Reads `PHASEPLAN_LOG_LEVEL` and `PHASEPLAN_LOG_JSON`. An empty level
/// means INFO.
pub fn config_from_env() -> Result<LoggingConfig, InvalidLogLevel> {
    let level = match env::var(LOG_LEVEL_ENV) {
        Ok(s) if !s.trim().is_empty() => parse_level(&s)?,
        _ => Level::INFO,
    };

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    Ok(LoggingConfig::with_level(level).json(use_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Ok(Level::TRACE));
        assert_eq!(parse_level("Debug"), Ok(Level::DEBUG));
        assert_eq!(parse_level(" warn "), Ok(Level::WARN));
        assert_eq!(parse_level("ERROR"), Ok(Level::ERROR));
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(
            parse_level("verbose"),
            Err(InvalidLogLevel("verbose".to_string()))
        );
        assert!(parse_level("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::set_var(LOG_LEVEL_ENV, "debug");
        env::set_var(LOG_JSON_ENV, "true");

        let config = config_from_env();

        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);

        let config = config.unwrap();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_config_from_env_rejects_unknown_level() {
        env::set_var(LOG_LEVEL_ENV, "loud");
        let result = config_from_env();
        env::remove_var(LOG_LEVEL_ENV);

        assert_eq!(result.unwrap_err(), InvalidLogLevel("loud".to_string()));
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults_to_info() {
        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);

        let config = config_from_env().unwrap();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
    }
}
