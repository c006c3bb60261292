//! Aggregate statistics over a catalog and its execution plan

mod text;

use crate::catalog::{Catalog, CatalogEntry};
use crate::classify::Category;
use crate::plan::ExecutionPlan;
use crate::score::ComplexityTier;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub entries: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializedEntry {
    pub name: String,
    pub relative_path: String,
    pub category: Category,
    pub complexity: ComplexityTier,
    pub lines: usize,
    pub definitions: usize,
}

impl From<&CatalogEntry> for SpecializedEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.artifact.name.clone(),
            relative_path: entry.artifact.relative_path.clone(),
            category: entry.category(),
            complexity: entry.tier(),
            lines: entry.lines(),
            definitions: entry.complexity.definitions,
        }
    }
}

/// A phase flattened to the relative paths it will run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub index: usize,
    pub name: String,
    pub capacity: usize,
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub root: String,
    pub total_entries: usize,
    pub total_files: usize,
    pub total_directories: usize,
    pub total_lines: usize,
    pub planned_entries: usize,
    pub categories: BTreeMap<Category, CategoryStats>,
    pub min_specialized_tier: ComplexityTier,
    pub specialized: Vec<SpecializedEntry>,
    pub phases: Vec<PhaseSummary>,
}

pub struct ReportGenerator {
    top_n: usize,
    min_tier: ComplexityTier,
}

impl ReportGenerator {
    pub fn new(top_n: usize, min_tier: ComplexityTier) -> Self {
        Self { top_n, min_tier }
    }

    pub fn generate(&self, catalog: &Catalog, plan: &ExecutionPlan) -> Report {
        let mut categories: BTreeMap<Category, CategoryStats> = Category::ALL
            .iter()
            .map(|c| (*c, CategoryStats::default()))
            .collect();
        for entry in catalog.iter() {
            let stats = categories.entry(entry.category()).or_default();
            stats.entries += 1;
            stats.lines += entry.lines();
        }

        let total_files = catalog.iter().filter(|e| e.artifact.is_file()).count();

        let mut specialized: Vec<&CatalogEntry> = catalog
            .iter()
            .filter(|e| e.tier() >= self.min_tier)
            .collect();
        specialized.sort_by_key(|e| (Reverse(e.tier()), Reverse(e.lines()), e.artifact.scan_order));
        specialized.truncate(self.top_n);

        let phases: Vec<PhaseSummary> = plan
            .phases
            .iter()
            .map(|phase| PhaseSummary {
                index: phase.index,
                name: phase.name.clone(),
                capacity: phase.capacity,
                entries: phase
                    .entries
                    .iter()
                    .filter_map(|&i| catalog.get(i))
                    .map(|e| e.artifact.relative_path.clone())
                    .collect(),
            })
            .collect();

        let report = Report {
            root: catalog.root().to_string_lossy().to_string(),
            total_entries: catalog.len(),
            total_files,
            total_directories: catalog.len() - total_files,
            total_lines: catalog.iter().map(CatalogEntry::lines).sum(),
            planned_entries: plan.scheduled_entries(),
            categories,
            min_specialized_tier: self.min_tier,
            specialized: specialized.into_iter().map(SpecializedEntry::from).collect(),
            phases,
        };

        debug!(
            total_entries = report.total_entries,
            specialized = report.specialized.len(),
            "Report generated"
        );
        report
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N, ComplexityTier::Medium)
    }
}
