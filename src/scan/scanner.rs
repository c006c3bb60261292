//! Directory walker producing artifacts

use super::artifact::file_extension;
use super::patterns::{
    is_excluded_dir_name, is_generated_file_name, is_text_candidate, DEFAULT_MAX_READ_BYTES,
};
use super::Artifact;
use chrono::{DateTime, Utc};
use ignore::{DirEntry, Walk, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fatal scan errors. Per-file read failures are never reported here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to resolve scan root {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum directory depth below the root, `None` for unlimited
    pub max_depth: Option<usize>,
    /// Files larger than this are cataloged without content
    pub max_read_bytes: u64,
    /// Honor `.gitignore` and `.ignore` files
    pub respect_gitignore: bool,
    /// Where a run writes its outputs. Skipped as a whole when it lies below
    /// the root; when it is the root itself only generated files are skipped.
    pub output_dir: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            respect_gitignore: false,
            output_dir: None,
        }
    }
}

pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner for an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ScanError> {
        let root = root.into();
        if !root.exists() {
            return Err(ScanError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let canonical = root
            .canonicalize()
            .map_err(|source| ScanError::Canonicalize {
                path: root.clone(),
                source,
            })?;

        debug!(root = %canonical.display(), "Scanner initialized");

        Ok(Self {
            root: canonical,
            config: ScanConfig::default(),
        })
    }

    pub fn with_config(mut self, mut config: ScanConfig) -> Self {
        config.output_dir = config
            .output_dir
            .map(|p| p.canonicalize().unwrap_or(p));
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a lazy walk over the root. Entries come out sorted by file name
    /// within each directory, so the sequence is stable for a fixed tree.
    pub fn scan(&self) -> ArtifactStream {
        info!(
            root = %self.root.display(),
            max_depth = ?self.config.max_depth,
            respect_gitignore = self.config.respect_gitignore,
            "Starting scan"
        );

        let exclusion = OutputExclusion::new(&self.root, self.config.output_dir.as_deref());
        let respect = self.config.respect_gitignore;

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .parents(false)
            .ignore(respect)
            .git_ignore(respect)
            .git_exclude(respect)
            .git_global(false)
            .require_git(false)
            .follow_links(false)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| should_descend(entry, &exclusion));

        ArtifactStream {
            walk: builder.build(),
            root: self.root.clone(),
            max_read_bytes: self.config.max_read_bytes,
            next_index: 0,
            unreadable: 0,
            started: Instant::now(),
            finished: false,
        }
    }
}

/// How the output directory is kept out of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputExclusion {
    Nothing,
    /// Output directory below the root: skip the whole subtree
    Subtree(PathBuf),
    /// Output directory is the root or above it: skip generated files only
    GeneratedFiles(PathBuf),
}

impl OutputExclusion {
    fn new(root: &Path, output_dir: Option<&Path>) -> Self {
        match output_dir {
            None => Self::Nothing,
            Some(dir) if root.starts_with(dir) => Self::GeneratedFiles(dir.to_path_buf()),
            Some(dir) => Self::Subtree(dir.to_path_buf()),
        }
    }

    fn skips(&self, entry: &DirEntry, is_dir: bool) -> bool {
        match self {
            Self::Nothing => false,
            Self::Subtree(dir) => entry.path().starts_with(dir),
            Self::GeneratedFiles(dir) => {
                !is_dir
                    && entry.path().parent() == Some(dir.as_path())
                    && entry
                        .file_name()
                        .to_str()
                        .map_or(false, is_generated_file_name)
            }
        }
    }
}

fn should_descend(entry: &DirEntry, exclusion: &OutputExclusion) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
    if is_dir {
        if let Some(name) = entry.file_name().to_str() {
            if is_excluded_dir_name(name) {
                return false;
            }
        }
    }

    !exclusion.skips(entry, is_dir)
}

/// Lazy sequence of artifacts returned by [`Scanner::scan`]
pub struct ArtifactStream {
    walk: Walk,
    root: PathBuf,
    max_read_bytes: u64,
    next_index: usize,
    unreadable: usize,
    started: Instant,
    finished: bool,
}

impl ArtifactStream {
    fn build_artifact(&mut self, entry: &DirEntry, index: usize) -> Artifact {
        let path = entry.path().to_path_buf();
        let relative_path = relative_display(&self.root, &path);
        let metadata = entry.metadata().ok();
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            return Artifact::directory(path, relative_path)
                .with_modified(modified)
                .with_scan_order(index);
        }

        let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let content = self.read_content(&path, size);

        Artifact::file(path, relative_path, content)
            .with_size(size)
            .with_modified(modified)
            .with_scan_order(index)
    }

    fn read_content(&mut self, path: &Path, size: u64) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = file_extension(&name);

        if !is_text_candidate(&name, &extension) {
            return String::new();
        }
        if size > self.max_read_bytes {
            debug!(
                path = %path.display(),
                size,
                max_read_bytes = self.max_read_bytes,
                "File exceeds read limit, cataloging without content"
            );
            return String::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                self.unreadable += 1;
                debug!(
                    path = %path.display(),
                    error = %err,
                    "Artifact read failed, cataloging with degraded metadata"
                );
                String::new()
            }
        }
    }
}

impl Iterator for ArtifactStream {
    type Item = Artifact;

    fn next(&mut self) -> Option<Artifact> {
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.walk.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
                None => {
                    self.finished = true;
                    info!(
                        artifacts = self.next_index,
                        unreadable = self.unreadable,
                        elapsed_ms = self.started.elapsed().as_millis() as u64,
                        "Scan completed"
                    );
                    return None;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let index = self.next_index;
            self.next_index += 1;
            return Some(self.build_artifact(&entry, index));
        }
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
