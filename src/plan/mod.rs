//! Phase sequencing
//!
//! Turns a catalog into an [`ExecutionPlan`]: an ordered list of phases, each
//! bounded by its declared capacity.

mod definitions;
mod sequencer;

pub use definitions::{canonical_phases, PhaseDefinition};
pub use sequencer::{ExecutionPlan, Phase, PhaseSequencer};
