//! The catalog: every scanned artifact with its classification and score
//!
//! A [`Catalog`] is built once per run and never mutated afterwards. Later
//! stages refer to entries by their index.

mod document;

pub use document::{CatalogDocument, CatalogFormat, CatalogMetadata, EntryRecord, RenderError};

use crate::classify::{Category, Classification, Classifier};
use crate::scan::Artifact;
use crate::score::{ComplexityScore, ComplexityScorer, ComplexityTier};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub artifact: Artifact,
    pub classification: Classification,
    pub complexity: ComplexityScore,
}

impl CatalogEntry {
    pub fn category(&self) -> Category {
        self.classification.category
    }

    pub fn tier(&self) -> ComplexityTier {
        self.complexity.tier
    }

    pub fn lines(&self) -> usize {
        self.complexity.lines
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Classifies and scores every artifact, keeping scan order
    pub fn build<I>(
        root: impl Into<PathBuf>,
        artifacts: I,
        classifier: &Classifier,
        scorer: &ComplexityScorer,
    ) -> Self
    where
        I: IntoIterator<Item = Artifact>,
    {
        let entries: Vec<CatalogEntry> = artifacts
            .into_iter()
            .map(|artifact| {
                let classification = classifier.classify(&artifact);
                let complexity = scorer.score(&artifact);
                debug!(
                    path = %artifact.relative_path,
                    category = %classification.category,
                    tier = %complexity.tier,
                    lines = complexity.lines,
                    "Cataloged artifact"
                );
                CatalogEntry {
                    artifact,
                    classification,
                    complexity,
                }
            })
            .collect();

        info!(entries = entries.len(), "Catalog built");

        Self::from_entries(root, entries)
    }

    pub fn from_entries(root: impl Into<PathBuf>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Entries grouped by category; every category is present, possibly empty
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&CatalogEntry>> {
        let mut grouped: BTreeMap<Category, Vec<&CatalogEntry>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for entry in &self.entries {
            grouped.entry(entry.category()).or_default().push(entry);
        }
        grouped
    }

    /// The persisted form of this catalog
    pub fn document(&self, generated_at: DateTime<Utc>) -> CatalogDocument {
        CatalogDocument::new(self, generated_at)
    }
}
