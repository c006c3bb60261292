//! Run configuration
//!
//! Settings load from environment variables with defaults; CLI flags then
//! override individual fields.
//!
//! # Environment Variables
//!
//! - `PHASEPLAN_OUTPUT_DIR`: where catalog, report and scripts go - default: `<root>/phaseplan-out`
//! - `PHASEPLAN_CATALOG_FORMAT`: `json` or `yaml` - default: `json`
//! - `PHASEPLAN_MAX_DEPTH`: maximum walk depth - default: unlimited
//! - `PHASEPLAN_MAX_READ_BYTES`: largest file read for content - default: 1 MiB
//! - `PHASEPLAN_RESPECT_GITIGNORE`: honor `.gitignore` files - default: `false`
//! - `PHASEPLAN_TOP_N`: specialized entries listed in the report - default: `10`
//! - `PHASEPLAN_MIN_SPECIALIZED_TIER`: lowest tier counted as specialized - default: `medium`
//! - `PHASEPLAN_PYTHON`: interpreter for `.py` entries - default: `python3`
//! - `PHASEPLAN_EMIT_SCRIPTS`: write phase and master scripts - default: `true`
//!
//! Logging reads its own variables, see [`crate::util::logging`].

use crate::catalog::CatalogFormat;
use crate::emit::{Interpreters, DEFAULT_PYTHON};
use crate::report::DEFAULT_TOP_N;
use crate::scan::patterns::DEFAULT_MAX_READ_BYTES;
use crate::scan::ScanConfig;
use crate::score::ComplexityTier;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR_NAME: &str = "phaseplan-out";

const MIN_READ_BYTES: u64 = 1024;
const MAX_READ_BYTES: u64 = 64 * 1024 * 1024;
const MAX_TOP_N: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    /// `None` resolves to `<root>/phaseplan-out`
    pub output_dir: Option<PathBuf>,
    pub catalog_format: CatalogFormat,
    pub max_depth: Option<usize>,
    pub max_read_bytes: u64,
    pub respect_gitignore: bool,
    pub top_n: usize,
    pub min_specialized_tier: ComplexityTier,
    pub python: String,
    pub emit_scripts: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            catalog_format: CatalogFormat::Json,
            max_depth: None,
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            respect_gitignore: false,
            top_n: DEFAULT_TOP_N,
            min_specialized_tier: ComplexityTier::Medium,
            python: DEFAULT_PYTHON.to_string(),
            emit_scripts: true,
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env_value(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: e.to_string(),
            })
        })
        .transpose()
}

fn parse_flag(key: &str) -> Result<Option<bool>, ConfigError> {
    env_value(key)
        .map(|raw| match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseError {
                field: key.to_string(),
                error: format!("expected true or false, got '{}'", raw),
            }),
        })
        .transpose()
}

impl PlanConfig {
    /// Built-in defaults overlaid with `PHASEPLAN_*` environment variables.
    /// Malformed values are errors, not silently replaced by defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            output_dir: env_value("PHASEPLAN_OUTPUT_DIR").map(PathBuf::from),
            catalog_format: env_parse("PHASEPLAN_CATALOG_FORMAT")?
                .unwrap_or(defaults.catalog_format),
            max_depth: env_parse("PHASEPLAN_MAX_DEPTH")?,
            max_read_bytes: env_parse("PHASEPLAN_MAX_READ_BYTES")?
                .unwrap_or(defaults.max_read_bytes),
            respect_gitignore: parse_flag("PHASEPLAN_RESPECT_GITIGNORE")?
                .unwrap_or(defaults.respect_gitignore),
            top_n: env_parse("PHASEPLAN_TOP_N")?.unwrap_or(defaults.top_n),
            min_specialized_tier: env_parse("PHASEPLAN_MIN_SPECIALIZED_TIER")?
                .unwrap_or(defaults.min_specialized_tier),
            python: env_value("PHASEPLAN_PYTHON").unwrap_or(defaults.python),
            emit_scripts: parse_flag("PHASEPLAN_EMIT_SCRIPTS")?.unwrap_or(defaults.emit_scripts),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_read_bytes < MIN_READ_BYTES {
            return Err(ConfigError::ValidationFailed(
                "Max read bytes must be at least 1KB".to_string(),
            ));
        }
        if self.max_read_bytes > MAX_READ_BYTES {
            return Err(ConfigError::ValidationFailed(
                "Max read bytes cannot exceed 64MB".to_string(),
            ));
        }

        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(ConfigError::ValidationFailed(format!(
                "Top N must be between 1 and {}",
                MAX_TOP_N
            )));
        }

        if self.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }

        if self.python.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Python interpreter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn output_dir_for(&self, root: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_OUTPUT_DIR_NAME))
    }

    /// Scanner settings; outputs written to `output_dir` are kept out of the walk
    pub fn scan_config(&self, output_dir: &Path) -> ScanConfig {
        ScanConfig {
            max_depth: self.max_depth,
            max_read_bytes: self.max_read_bytes,
            respect_gitignore: self.respect_gitignore,
            output_dir: Some(output_dir.to_path_buf()),
        }
    }

    pub fn interpreters(&self) -> Interpreters {
        Interpreters::new(self.python.clone())
    }
}

impl fmt::Display for PlanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        match &self.output_dir {
            Some(dir) => writeln!(f, "  Output Dir: {}", dir.display())?,
            None => writeln!(f, "  Output Dir: <root>/{}", DEFAULT_OUTPUT_DIR_NAME)?,
        }
        writeln!(f, "  Catalog Format: {}", self.catalog_format)?;
        match self.max_depth {
            Some(depth) => writeln!(f, "  Max Depth: {}", depth)?,
            None => writeln!(f, "  Max Depth: unlimited")?,
        }
        writeln!(f, "  Max Read Bytes: {}", self.max_read_bytes)?;
        writeln!(f, "  Respect .gitignore: {}", self.respect_gitignore)?;
        writeln!(f, "  Top N: {}", self.top_n)?;
        writeln!(f, "  Min Specialized Tier: {}", self.min_specialized_tier)?;
        writeln!(f, "  Python: {}", self.python)?;
        writeln!(f, "  Emit Scripts: {}", self.emit_scripts)?;
        Ok(())
    }
}
