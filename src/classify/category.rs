use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of classification tags
///
/// The declaration order is the order categories appear in catalogs and
/// reports. It is unrelated to rule priority, which lives in the rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Configuration,
    CoreCircuit,
    EntanglementTest,
    AdvancedProtocol,
    ComplexAlgorithm,
    UserInterface,
    DataAnalysis,
    OrchestrationModule,
    Maintenance,
    BackupRestore,
    Documentation,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Configuration,
        Category::CoreCircuit,
        Category::EntanglementTest,
        Category::AdvancedProtocol,
        Category::ComplexAlgorithm,
        Category::UserInterface,
        Category::DataAnalysis,
        Category::OrchestrationModule,
        Category::Maintenance,
        Category::BackupRestore,
        Category::Documentation,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Configuration => "configuration",
            Category::CoreCircuit => "core-circuit",
            Category::EntanglementTest => "entanglement-test",
            Category::AdvancedProtocol => "advanced-protocol",
            Category::ComplexAlgorithm => "complex-algorithm",
            Category::UserInterface => "user-interface",
            Category::DataAnalysis => "data-analysis",
            Category::OrchestrationModule => "orchestration-module",
            Category::Maintenance => "maintenance",
            Category::BackupRestore => "backup-restore",
            Category::Documentation => "documentation",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}
