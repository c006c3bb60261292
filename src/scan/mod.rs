//! Artifact discovery
//!
//! The [`Scanner`] walks a root directory and yields [`Artifact`]s lazily.
//! A missing root is the only fatal condition; unreadable files are still
//! emitted, just without content.

mod artifact;
pub mod patterns;
mod scanner;

pub use artifact::{Artifact, ArtifactKind};
pub use scanner::{ArtifactStream, ScanConfig, ScanError, Scanner};
