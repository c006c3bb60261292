use crate::catalog::CatalogEntry;
use crate::classify::Category;
use serde::{Deserialize, Serialize};

/// A named, capacity-bounded slot in the execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDefinition {
    pub name: String,
    pub categories: Vec<Category>,
    pub capacity: usize,
    /// Only admit files a known interpreter can run
    pub runnable_only: bool,
}

impl PhaseDefinition {
    pub fn new(name: impl Into<String>, categories: Vec<Category>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            categories,
            capacity,
            runnable_only: true,
        }
    }

    /// Also admit files without a known interpreter; they are invoked directly
    pub fn include_non_runnable(mut self) -> Self {
        self.runnable_only = false;
        self
    }

    /// Directories are never scheduled
    pub fn accepts(&self, entry: &CatalogEntry) -> bool {
        if !entry.artifact.is_file() || !self.categories.contains(&entry.category()) {
            return false;
        }
        !self.runnable_only || entry.artifact.is_runnable()
    }
}

/// The canonical phase list, in execution order
pub fn canonical_phases() -> Vec<PhaseDefinition> {
    vec![
        PhaseDefinition::new("configuration", vec![Category::Configuration], 10),
        PhaseDefinition::new("core-circuits", vec![Category::CoreCircuit], 15),
        PhaseDefinition::new("entanglement-tests", vec![Category::EntanglementTest], 15),
        PhaseDefinition::new("advanced-protocols", vec![Category::AdvancedProtocol], 10),
        PhaseDefinition::new("complex-algorithms", vec![Category::ComplexAlgorithm], 10),
        PhaseDefinition::new("data-analysis", vec![Category::DataAnalysis], 10),
        PhaseDefinition::new("user-interfaces", vec![Category::UserInterface], 5),
        PhaseDefinition::new("orchestration", vec![Category::OrchestrationModule], 5),
        PhaseDefinition::new("maintenance", vec![Category::Maintenance], 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::scan::Artifact;
    use crate::score::{ComplexityScore, ComplexityTier};

    fn entry(artifact: Artifact, category: Category) -> CatalogEntry {
        CatalogEntry {
            artifact,
            classification: Classification {
                category,
                rule: None,
                matched_terms: Vec::new(),
            },
            complexity: ComplexityScore {
                tier: ComplexityTier::VeryLow,
                lines: 0,
                definitions: 0,
            },
        }
    }

    #[test]
    fn test_accepts_runnable_files_of_category() {
        let def = PhaseDefinition::new("circuits", vec![Category::CoreCircuit], 5);

        let script = entry(Artifact::file("/l/a.py", "a.py", ""), Category::CoreCircuit);
        let notes = entry(Artifact::file("/l/a.qasm", "a.qasm", ""), Category::CoreCircuit);
        let other = entry(Artifact::file("/l/b.py", "b.py", ""), Category::Maintenance);
        let dir = entry(Artifact::directory("/l/c", "c"), Category::CoreCircuit);

        assert!(def.accepts(&script));
        assert!(!def.accepts(&notes));
        assert!(!def.accepts(&other));
        assert!(!def.accepts(&dir));
    }

    #[test]
    fn test_include_non_runnable() {
        let def = PhaseDefinition::new("circuits", vec![Category::CoreCircuit], 5)
            .include_non_runnable();
        let notes = entry(Artifact::file("/l/a.qasm", "a.qasm", ""), Category::CoreCircuit);
        let dir = entry(Artifact::directory("/l/c", "c"), Category::CoreCircuit);

        assert!(def.accepts(&notes));
        assert!(!def.accepts(&dir));
    }

    #[test]
    fn test_canonical_phases() {
        let phases = canonical_phases();
        assert_eq!(phases.len(), 9);
        assert_eq!(phases[0].name, "configuration");
        assert!(phases.iter().all(|p| p.capacity > 0 && p.runnable_only));
        assert!(!phases
            .iter()
            .any(|p| p.categories.contains(&Category::Documentation)));
    }
}
