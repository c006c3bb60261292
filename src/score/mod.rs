//! Coarse complexity tiers derived from line and definition counts

use crate::scan::Artifact;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityTier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 5] = [
        ComplexityTier::VeryLow,
        ComplexityTier::Low,
        ComplexityTier::Medium,
        ComplexityTier::High,
        ComplexityTier::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityTier::VeryLow => "very-low",
            ComplexityTier::Low => "low",
            ComplexityTier::Medium => "medium",
            ComplexityTier::High => "high",
            ComplexityTier::VeryHigh => "very-high",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        ComplexityTier::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid complexity tier: {}. Valid options: very-low, low, medium, high, very-high",
                    s
                )
            })
    }
}

/// Exclusive upper line bounds for the four lower tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub very_low: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            very_low: 30,
            low: 100,
            medium: 300,
            high: 500,
        }
    }
}

impl TierThresholds {
    pub fn tier_for(&self, lines: usize) -> ComplexityTier {
        if lines < self.very_low {
            ComplexityTier::VeryLow
        } else if lines < self.low {
            ComplexityTier::Low
        } else if lines < self.medium {
            ComplexityTier::Medium
        } else if lines < self.high {
            ComplexityTier::High
        } else {
            ComplexityTier::VeryHigh
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub tier: ComplexityTier,
    pub lines: usize,
    /// Carried for reporting; it does not move tier boundaries
    pub definitions: usize,
}

pub struct ComplexityScorer {
    thresholds: TierThresholds,
    definition_re: Regex,
}

impl ComplexityScorer {
    pub fn new(thresholds: TierThresholds) -> Self {
        let definition_re = Regex::new(
            r"(?m)^[ \t]*(?:async[ \t]+def|def|class|pub(?:\([^)\n]*\))?[ \t]+fn|fn|function|func)[ \t]+[A-Za-z_]",
        )
        .expect("valid regex");

        Self {
            thresholds,
            definition_re,
        }
    }

    /// Counts function and class definitions with a line-anchored text search
    pub fn count_definitions(&self, content: &str) -> usize {
        self.definition_re.find_iter(content).count()
    }

    pub fn score(&self, artifact: &Artifact) -> ComplexityScore {
        ComplexityScore {
            tier: self.thresholds.tier_for(artifact.lines),
            lines: artifact.lines,
            definitions: self.count_definitions(&artifact.content),
        }
    }
}

impl Default for ComplexityScorer {
    fn default() -> Self {
        Self::new(TierThresholds::default())
    }
}
