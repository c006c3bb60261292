use super::patterns::is_runnable_extension;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Whether an artifact is a regular file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    File,
    Directory,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::File => "file",
            ArtifactKind::Directory => "directory",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered file or directory under the scan root
///
/// Artifacts are produced by the [`Scanner`](super::Scanner) and never change
/// afterwards. The content snapshot is best effort: it stays empty for
/// directories, binary or oversized files, and files that failed to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    pub name: String,
    pub kind: ArtifactKind,
    /// Lowercased extension without the dot, empty for directories
    pub extension: String,
    pub size: u64,
    pub lines: usize,
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub content: String,
    /// Position in the scan sequence
    pub scan_order: usize,
}

impl Artifact {
    /// Creates a file artifact from an already-read content snapshot
    pub fn file(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let relative_path = relative_path.into();
        let content = content.into();
        let name = artifact_name(&path, &relative_path);
        let extension = file_extension(&name);

        Self {
            size: content.len() as u64,
            lines: content.lines().count(),
            path,
            relative_path,
            name,
            kind: ArtifactKind::File,
            extension,
            modified: None,
            content,
            scan_order: 0,
        }
    }

    pub fn directory(path: impl Into<PathBuf>, relative_path: impl Into<String>) -> Self {
        let path = path.into();
        let relative_path = relative_path.into();
        let name = artifact_name(&path, &relative_path);

        Self {
            path,
            relative_path,
            name,
            kind: ArtifactKind::Directory,
            extension: String::new(),
            size: 0,
            lines: 0,
            modified: None,
            content: String::new(),
            scan_order: 0,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_scan_order(mut self, scan_order: usize) -> Self {
        self.scan_order = scan_order;
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == ArtifactKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ArtifactKind::Directory
    }

    /// A file that a known interpreter can execute
    pub fn is_runnable(&self) -> bool {
        self.is_file() && is_runnable_extension(&self.extension)
    }

    /// Directory the artifact lives in
    pub fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn artifact_name(path: &Path, relative_path: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| {
            relative_path
                .rsplit('/')
                .next()
                .unwrap_or(relative_path)
                .to_string()
        })
}

/// Lowercased extension of a file name, empty when there is none
pub(crate) fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
