//! phaseplan - discover, classify and sequence the artifacts of a directory tree
//!
//! The crate walks a root directory, records every file and directory it finds,
//! assigns each one a category with an ordered rule set, scores it by size and
//! then distributes the runnable files into capacity-bounded execution phases.
//! A full run writes a catalog (JSON or YAML), a plain-text report and one
//! fail-fast POSIX script per phase plus a master script.
//!
//! # Example Usage
//!
//! ```no_run
//! use phaseplan::{PipelineOrchestrator, PlanConfig};
//! use std::path::Path;
//!
//! let orchestrator = PipelineOrchestrator::new(PlanConfig::default());
//! let analysis = orchestrator.analyze(Path::new("/path/to/lab"))?;
//!
//! for phase in &analysis.plan.phases {
//!     println!("Phase {:02}: {} ({} entries)", phase.index, phase.name, phase.len());
//! }
//! # Ok::<(), phaseplan::PipelineError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: directory walking and artifact records
//! - [`classify`]: categories and first-match-wins classification rules
//! - [`score`]: line-based complexity tiers
//! - [`catalog`]: the classified, scored inventory and its serialized form
//! - [`plan`]: phase definitions and the sequencer
//! - [`report`]: summary statistics and the text report
//! - [`emit`]: POSIX shell script generation
//! - [`pipeline`]: the end-to-end run and its error model

pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod emit;
pub mod pipeline;
pub mod plan;
pub mod progress;
pub mod report;
pub mod scan;
pub mod score;
pub mod util;

pub use catalog::{Catalog, CatalogDocument, CatalogEntry, CatalogFormat};
pub use classify::{Category, Classifier};
pub use config::{ConfigError, PlanConfig};
pub use emit::{EmitError, ScriptEmitter};
pub use pipeline::{Analysis, PipelineError, PipelineOrchestrator, RunSummary};
pub use plan::{ExecutionPlan, Phase, PhaseSequencer};
pub use report::{Report, ReportGenerator};
pub use scan::{Artifact, ArtifactKind, ScanError, Scanner};
pub use score::{ComplexityScorer, ComplexityTier};
pub use util::{init_logging, InvalidLogLevel, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
