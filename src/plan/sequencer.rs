use super::definitions::{canonical_phases, PhaseDefinition};
use crate::catalog::Catalog;
use crate::classify::Category;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// One realized phase: catalog indices in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// 1-based position in the plan
    pub index: usize,
    pub name: String,
    pub capacity: usize,
    pub categories: Vec<Category>,
    pub entries: Vec<usize>,
}

impl Phase {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub phases: Vec<Phase>,
}

impl ExecutionPlan {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Number of catalog entries scheduled across all phases
    pub fn scheduled_entries(&self) -> usize {
        self.phases.iter().map(Phase::len).sum()
    }

    pub fn phase_of(&self, entry_index: usize) -> Option<&Phase> {
        self.phases.iter().find(|p| p.entries.contains(&entry_index))
    }
}

pub struct PhaseSequencer {
    definitions: Vec<PhaseDefinition>,
}

impl PhaseSequencer {
    pub fn new(definitions: Vec<PhaseDefinition>) -> Self {
        Self { definitions }
    }

    pub fn canonical() -> Self {
        Self::new(canonical_phases())
    }

    pub fn definitions(&self) -> &[PhaseDefinition] {
        &self.definitions
    }

    /// Fills phases in definition order. Within a phase, entries are ranked by
    /// tier then line count, both descending, with scan order breaking ties.
    /// An entry taken by an earlier phase is never offered to a later one.
    pub fn sequence(&self, catalog: &Catalog) -> ExecutionPlan {
        let entries = catalog.entries();
        let mut assigned = vec![false; entries.len()];
        let mut phases = Vec::with_capacity(self.definitions.len());

        for (offset, definition) in self.definitions.iter().enumerate() {
            let mut candidates: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(i, entry)| !assigned[*i] && definition.accepts(entry))
                .map(|(i, _)| i)
                .collect();

            candidates.sort_by(|&a, &b| rank(catalog, a, b));
            let available = candidates.len();
            candidates.truncate(definition.capacity);

            for &index in &candidates {
                assigned[index] = true;
            }

            debug!(
                phase = %definition.name,
                selected = candidates.len(),
                available,
                capacity = definition.capacity,
                "Phase sequenced"
            );

            phases.push(Phase {
                index: offset + 1,
                name: definition.name.clone(),
                capacity: definition.capacity,
                categories: definition.categories.clone(),
                entries: candidates,
            });
        }

        let plan = ExecutionPlan { phases };
        info!(
            phases = plan.len(),
            scheduled = plan.scheduled_entries(),
            catalog_entries = entries.len(),
            "Execution plan built"
        );
        plan
    }
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::canonical()
    }
}

fn rank(catalog: &Catalog, a: usize, b: usize) -> Ordering {
    let (ea, eb) = (&catalog.entries()[a], &catalog.entries()[b]);
    eb.tier()
        .cmp(&ea.tier())
        .then_with(|| eb.lines().cmp(&ea.lines()))
        .then_with(|| ea.artifact.scan_order.cmp(&eb.artifact.scan_order))
        .then_with(|| a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::scan::Artifact;
    use crate::score::ComplexityScorer;
    use std::collections::HashSet;

    fn lines(n: usize) -> String {
        "x = 1\n".repeat(n)
    }

    fn catalog_of(files: &[(&str, usize)]) -> Catalog {
        let artifacts = files.iter().enumerate().map(|(i, (name, n))| {
            Artifact::file(format!("/lab/{}", name), *name, lines(*n)).with_scan_order(i)
        });
        Catalog::build(
            "/lab",
            artifacts,
            &Classifier::canonical(),
            &ComplexityScorer::default(),
        )
    }

    fn names(catalog: &Catalog, phase: &Phase) -> Vec<String> {
        phase
            .entries
            .iter()
            .map(|&i| catalog.entries()[i].artifact.name.clone())
            .collect()
    }

    #[test]
    fn test_orders_by_tier_then_lines_then_scan_order() {
        let catalog = catalog_of(&[
            ("circuit_a.py", 40),
            ("circuit_b.py", 600),
            ("circuit_c.py", 40),
            ("circuit_d.py", 120),
            ("circuit_e.py", 90),
        ]);
        let sequencer = PhaseSequencer::new(vec![PhaseDefinition::new(
            "circuits",
            vec![Category::CoreCircuit],
            10,
        )]);

        let plan = sequencer.sequence(&catalog);
        assert_eq!(
            names(&catalog, &plan.phases[0]),
            vec![
                "circuit_b.py",
                "circuit_d.py",
                "circuit_e.py",
                "circuit_a.py",
                "circuit_c.py"
            ]
        );
    }

    #[test]
    fn test_capacity_is_respected() {
        let catalog = catalog_of(&[
            ("circuit_1.py", 10),
            ("circuit_2.py", 20),
            ("circuit_3.py", 30),
        ]);
        let sequencer = PhaseSequencer::new(vec![PhaseDefinition::new(
            "circuits",
            vec![Category::CoreCircuit],
            2,
        )]);

        let plan = sequencer.sequence(&catalog);
        assert_eq!(plan.phases[0].len(), 2);
        assert_eq!(
            names(&catalog, &plan.phases[0]),
            vec!["circuit_3.py", "circuit_2.py"]
        );
    }

    #[test]
    fn test_no_entry_in_two_phases() {
        let catalog = catalog_of(&[
            ("circuit_1.py", 10),
            ("circuit_2.py", 20),
            ("circuit_3.py", 30),
        ]);
        let sequencer = PhaseSequencer::new(vec![
            PhaseDefinition::new("first", vec![Category::CoreCircuit], 1),
            PhaseDefinition::new("second", vec![Category::CoreCircuit], 5),
        ]);

        let plan = sequencer.sequence(&catalog);
        assert_eq!(names(&catalog, &plan.phases[0]), vec!["circuit_3.py"]);
        assert_eq!(
            names(&catalog, &plan.phases[1]),
            vec!["circuit_2.py", "circuit_1.py"]
        );

        let mut seen = HashSet::new();
        for phase in &plan.phases {
            for index in &phase.entries {
                assert!(seen.insert(*index), "entry {} scheduled twice", index);
            }
        }
        assert!(plan.scheduled_entries() <= catalog.len());
    }

    #[test]
    fn test_empty_catalog_yields_empty_phases() {
        let plan = PhaseSequencer::canonical().sequence(&Catalog::default());

        assert_eq!(plan.len(), canonical_phases().len());
        assert!(plan.phases.iter().all(Phase::is_empty));
        let indices: Vec<usize> = plan.phases.iter().map(|p| p.index).collect();
        assert_eq!(indices, (1..=plan.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_unmatched_phases_are_kept() {
        let catalog = catalog_of(&[("grover.py", 10)]);
        let plan = PhaseSequencer::canonical().sequence(&catalog);

        assert_eq!(plan.len(), 9);
        let algorithms = plan
            .phases
            .iter()
            .find(|p| p.name == "complex-algorithms")
            .unwrap();
        assert_eq!(algorithms.entries, vec![0]);
        assert_eq!(plan.phase_of(0).map(|p| p.index), Some(5));
    }

    #[test]
    fn test_sequencing_is_deterministic() {
        let catalog = catalog_of(&[
            ("circuit_1.py", 50),
            ("teste_bell.py", 200),
            ("grover.py", 10),
            ("circuit_2.py", 50),
        ]);
        let sequencer = PhaseSequencer::canonical();
        assert_eq!(sequencer.sequence(&catalog), sequencer.sequence(&catalog));
    }
}
