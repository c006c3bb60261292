//! Output formatting for JSON, YAML and human-readable text

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::CatalogDocument;
use crate::classify::{Category, Rule};
use crate::pipeline::RunSummary;
use crate::plan::PhaseDefinition;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

#[derive(Serialize)]
struct RuleView<'a> {
    priority: usize,
    name: &'a str,
    category: Category,
    matchers: Vec<String>,
}

#[derive(Serialize)]
struct RulesView<'a> {
    rules: Vec<RuleView<'a>>,
    phases: &'a [PhaseDefinition],
}

#[derive(Serialize)]
struct PlanView<'a> {
    generated_at: DateTime<Utc>,
    report: &'a Report,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_catalog(&self, document: &CatalogDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(document, "catalog"),
            OutputFormat::Yaml => to_yaml(document, "catalog"),
            OutputFormat::Human => Ok(self.format_catalog_human(document)),
        }
    }

    pub fn format_plan(&self, report: &Report, generated_at: DateTime<Utc>) -> Result<String> {
        let view = PlanView {
            generated_at,
            report,
        };
        match self.format {
            OutputFormat::Json => to_json(&view, "report"),
            OutputFormat::Yaml => to_yaml(&view, "report"),
            OutputFormat::Human => Ok(report.render_text(generated_at)),
        }
    }

    pub fn format_rules(&self, rules: &[Rule], phases: &[PhaseDefinition]) -> Result<String> {
        let view = RulesView {
            rules: rules
                .iter()
                .enumerate()
                .map(|(i, rule)| RuleView {
                    priority: i + 1,
                    name: rule.name,
                    category: rule.category,
                    matchers: rule.matchers.iter().map(|m| m.to_string()).collect(),
                })
                .collect(),
            phases,
        };
        match self.format {
            OutputFormat::Json => to_json(&view, "rules"),
            OutputFormat::Yaml => to_yaml(&view, "rules"),
            OutputFormat::Human => Ok(self.format_rules_human(rules, phases)),
        }
    }

    // Human-readable formatting methods

    fn format_catalog_human(&self, document: &CatalogDocument) -> String {
        let mut output = String::new();

        output.push_str(&format!("Catalog of {}\n", document.metadata.root));
        output.push_str(&format!("Entries: {}\n", document.total_entries));

        for (category, records) in &document.categories {
            if records.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{} ({})\n", category, records.len()));
            for record in records {
                output.push_str(&format!(
                    "  {:<48} {:<9} {:>7} lines  {}\n",
                    record.relative_path,
                    record.kind.as_str(),
                    record.lines,
                    record.complexity
                ));
            }
        }

        output
    }

    fn format_rules_human(&self, rules: &[Rule], phases: &[PhaseDefinition]) -> String {
        let mut output = String::new();

        output.push_str("Classification rules (first match wins)\n");
        for (i, rule) in rules.iter().enumerate() {
            output.push_str(&format!("{:>3}. {} -> {}\n", i + 1, rule.name, rule.category));
            for matcher in &rule.matchers {
                output.push_str(&format!("       {}\n", matcher));
            }
        }
        output.push_str(&format!("     unmatched -> {}\n\n", Category::Other));

        output.push_str("Phases\n");
        for (i, phase) in phases.iter().enumerate() {
            let categories: Vec<&str> = phase.categories.iter().map(|c| c.as_str()).collect();
            output.push_str(&format!(
                "  {:02}. {} [{}] capacity {}{}\n",
                i + 1,
                phase.name,
                categories.join(", "),
                phase.capacity,
                if phase.runnable_only {
                    ""
                } else {
                    ", includes non-runnable"
                }
            ));
        }

        output
    }

    /// Short human summary of a full run
    pub fn format_run_summary(&self, summary: &RunSummary) -> String {
        let analysis = &summary.analysis;
        let mut output = String::new();

        output.push_str(&format!(
            "Cataloged {} entries ({} files, {} lines) under {}\n",
            analysis.report.total_entries,
            analysis.report.total_files,
            analysis.report.total_lines,
            analysis.report.root
        ));
        output.push_str(&format!(
            "Scheduled {} entries across {} phases\n",
            analysis.plan.scheduled_entries(),
            analysis.plan.len()
        ));
        output.push_str(&format!("Catalog: {}\n", summary.catalog_path.display()));
        output.push_str(&format!("Report:  {}\n", summary.report_path.display()));
        match &summary.scripts {
            Some(scripts) => output.push_str(&format!(
                "Scripts: {} ({} phase scripts)\n",
                scripts.master_script.display(),
                scripts.phase_scripts.len()
            )),
            None => output.push_str("Scripts: skipped\n"),
        }

        output
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::classify::{canonical_rules, Classifier};
    use crate::plan::{canonical_phases, PhaseSequencer};
    use crate::report::ReportGenerator;
    use crate::scan::Artifact;
    use crate::score::ComplexityScorer;
    use chrono::TimeZone;

    fn catalog() -> Catalog {
        Catalog::build(
            "/lab",
            vec![
                Artifact::file("/lab/README.md", "README.md", "# Lab\n"),
                Artifact::file("/lab/grover.py", "grover.py", "def run():\n    pass\n")
                    .with_scan_order(1),
            ],
            &Classifier::canonical(),
            &ComplexityScorer::default(),
        )
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 6, 7, 8, 9).unwrap()
    }

    #[test]
    fn test_catalog_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_catalog(&catalog().document(at())).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total_entries"], 2);
        assert_eq!(value["categories"]["complex-algorithm"][0]["name"], "grover.py");
    }

    #[test]
    fn test_catalog_human_skips_empty_categories() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_catalog(&catalog().document(at())).unwrap();

        assert!(output.contains("Entries: 2"));
        assert!(output.contains("documentation (1)"));
        assert!(output.contains("grover.py"));
        assert!(!output.contains("maintenance ("));
    }

    #[test]
    fn test_plan_yaml_includes_timestamp() {
        let catalog = catalog();
        let plan = PhaseSequencer::canonical().sequence(&catalog);
        let report = ReportGenerator::default().generate(&catalog, &plan);

        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_plan(&report, at()).unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["report"]["total_entries"].as_u64(), Some(2));
        assert!(output.contains("generated_at"));
    }

    #[test]
    fn test_rules_human_lists_priority_order() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_rules(&canonical_rules(), &canonical_phases())
            .unwrap();

        let backup = output.find("backup-artifacts -> backup-restore").unwrap();
        let maintenance = output.find("maintenance-tools -> maintenance").unwrap();
        assert!(backup < maintenance);
        assert!(output.contains("  01. configuration [configuration] capacity 10"));
        assert!(output.contains("unmatched -> other"));
    }

    #[test]
    fn test_rules_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter
            .format_rules(&canonical_rules(), &canonical_phases())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rules"][0]["name"], "backup-artifacts");
        assert_eq!(value["rules"][0]["priority"], 1);
        assert_eq!(value["phases"].as_array().unwrap().len(), 9);
    }
}
