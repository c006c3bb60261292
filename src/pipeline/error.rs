use crate::catalog::RenderError;
use crate::emit::EmitError;
use crate::scan::ScanError;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit status for a successful run
pub const EXIT_OK: i32 = 0;
/// Root missing or not a directory
pub const EXIT_DISCOVERY: i32 = 1;
/// Bad configuration or command line
pub const EXIT_USAGE: i32 = 2;
/// Catalog, report or scripts could not be written
pub const EXIT_OUTPUT: i32 = 3;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Discovery failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Catalog serialization failed: {0}")]
    CatalogSerialize(#[from] RenderError),

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script emission failed: {0}")]
    Emit(#[from] EmitError),
}

impl PipelineError {
    /// Failures that happen before any catalog exists
    pub fn is_discovery_failure(&self) -> bool {
        matches!(self, PipelineError::Scan(_))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_discovery_failure() {
            EXIT_DISCOVERY
        } else {
            EXIT_OUTPUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        let missing = PipelineError::from(ScanError::RootNotFound(PathBuf::from("/nope")));
        assert!(missing.is_discovery_failure());
        assert_eq!(missing.exit_code(), EXIT_DISCOVERY);

        let write = PipelineError::OutputWrite {
            path: PathBuf::from("/out/report.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!write.is_discovery_failure());
        assert_eq!(write.exit_code(), EXIT_OUTPUT);

        let emit = PipelineError::from(EmitError::ScriptWrite {
            path: PathBuf::from("/out/phase_01.sh"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        });
        assert_eq!(emit.exit_code(), EXIT_OUTPUT);
    }

    #[test]
    fn test_error_messages() {
        let err = PipelineError::from(ScanError::NotADirectory(PathBuf::from("/lab/file.py")));
        assert_eq!(
            err.to_string(),
            "Discovery failed: Scan root is not a directory: /lab/file.py"
        );
    }
}
