use super::rules::{canonical_rules, Rule, Subject};
use super::Category;
use crate::scan::Artifact;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of classifying one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    /// Name of the winning rule, `None` when nothing matched
    pub rule: Option<String>,
    pub matched_terms: Vec<String>,
}

impl Classification {
    pub fn other() -> Self {
        Self {
            category: Category::Other,
            rule: None,
            matched_terms: Vec::new(),
        }
    }
}

/// First-match-wins classifier over an ordered rule list
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn canonical() -> Self {
        Self::new(canonical_rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, artifact: &Artifact) -> Classification {
        let subject = Subject::new(artifact);

        for rule in &self.rules {
            let matched_terms = rule.evaluate(&subject);
            if !matched_terms.is_empty() {
                trace!(
                    path = %artifact.relative_path,
                    rule = rule.name,
                    category = %rule.category,
                    "Rule matched"
                );
                return Classification {
                    category: rule.category,
                    rule: Some(rule.name.to_string()),
                    matched_terms,
                };
            }
        }

        Classification::other()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::canonical()
    }
}
