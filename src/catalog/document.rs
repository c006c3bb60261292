//! Serializable catalog document written to disk

use super::{Catalog, CatalogEntry};
use crate::classify::Category;
use crate::scan::ArtifactKind;
use crate::score::ComplexityTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            CatalogFormat::Json => "catalog.json",
            CatalogFormat::Yaml => "catalog.yaml",
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFormat::Json => f.write_str("json"),
            CatalogFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(CatalogFormat::Json),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            _ => Err(format!(
                "Invalid catalog format: {}. Valid options: json, yaml",
                s
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Run metadata. `generated_at` is the only field that differs between two
/// runs over the same tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub tool: String,
    pub version: String,
    pub root: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    pub path: String,
    pub relative_path: String,
    pub kind: ArtifactKind,
    pub size: u64,
    pub lines: usize,
    pub definitions: usize,
    pub complexity: ComplexityTier,
    pub rule: Option<String>,
    pub matched_terms: Vec<String>,
    pub modified: Option<DateTime<Utc>>,
}

impl From<&CatalogEntry> for EntryRecord {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.artifact.name.clone(),
            path: entry.artifact.path.to_string_lossy().to_string(),
            relative_path: entry.artifact.relative_path.clone(),
            kind: entry.artifact.kind,
            size: entry.artifact.size,
            lines: entry.complexity.lines,
            definitions: entry.complexity.definitions,
            complexity: entry.complexity.tier,
            rule: entry.classification.rule.clone(),
            matched_terms: entry.classification.matched_terms.clone(),
            modified: entry.artifact.modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub metadata: CatalogMetadata,
    pub total_entries: usize,
    pub categories: BTreeMap<Category, Vec<EntryRecord>>,
}

impl CatalogDocument {
    pub fn new(catalog: &Catalog, generated_at: DateTime<Utc>) -> Self {
        let categories = catalog
            .by_category()
            .into_iter()
            .map(|(category, entries)| {
                (
                    category,
                    entries.into_iter().map(EntryRecord::from).collect(),
                )
            })
            .collect();

        Self {
            metadata: CatalogMetadata {
                tool: crate::NAME.to_string(),
                version: crate::VERSION.to_string(),
                root: catalog.root().to_string_lossy().to_string(),
                generated_at,
            },
            total_entries: catalog.len(),
            categories,
        }
    }

    pub fn render(&self, format: CatalogFormat) -> Result<String, RenderError> {
        match format {
            CatalogFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)?;
                json.push('\n');
                Ok(json)
            }
            CatalogFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::scan::Artifact;
    use crate::score::ComplexityScorer;
    use chrono::TimeZone;

    fn sample_catalog() -> Catalog {
        Catalog::build(
            "/lab",
            vec![
                Artifact::file("/lab/README.md", "README.md", "# Lab\n"),
                Artifact::file("/lab/ghz_circuit.py", "ghz_circuit.py", "import cirq\n")
                    .with_scan_order(1),
            ],
            &Classifier::canonical(),
            &ComplexityScorer::default(),
        )
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_document_groups_by_category() {
        let doc = sample_catalog().document(fixed_time());

        assert_eq!(doc.total_entries, 2);
        assert_eq!(doc.categories.len(), Category::ALL.len());
        assert_eq!(doc.categories[&Category::Documentation].len(), 1);
        assert_eq!(doc.categories[&Category::EntanglementTest].len(), 1);
        assert!(doc.categories[&Category::Other].is_empty());

        let record = &doc.categories[&Category::Documentation][0];
        assert_eq!(record.name, "README.md");
        assert_eq!(record.kind, ArtifactKind::File);
        assert_eq!(record.complexity, ComplexityTier::VeryLow);
        assert_eq!(record.matched_terms, vec!["ext:md", "name:readme"]);
    }

    #[test]
    fn test_json_render_is_key_ordered() {
        let json = sample_catalog()
            .document(fixed_time())
            .render(CatalogFormat::Json)
            .unwrap();

        let configuration = json.find("\"configuration\"").unwrap();
        let documentation = json.find("\"documentation\"").unwrap();
        let other = json.find("\"other\"").unwrap();
        assert!(configuration < documentation && documentation < other);
        assert!(json.contains("\"generated_at\": \"2026-01-02T03:04:05Z\""));
    }

    #[test]
    fn test_yaml_render_parses_back() {
        let doc = sample_catalog().document(fixed_time());
        let yaml = doc.render(CatalogFormat::Yaml).unwrap();
        let parsed: CatalogDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_catalog_format_from_str() {
        assert_eq!("JSON".parse::<CatalogFormat>(), Ok(CatalogFormat::Json));
        assert_eq!("yml".parse::<CatalogFormat>(), Ok(CatalogFormat::Yaml));
        assert!("xml".parse::<CatalogFormat>().is_err());
        assert_eq!(CatalogFormat::Yaml.file_name(), "catalog.yaml");
    }
}
