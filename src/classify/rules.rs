//! Named heuristic rules and the canonical priority order

use super::Category;
use crate::scan::Artifact;
use regex::Regex;
use std::fmt;

/// Lowercased views of an artifact that matchers run against
pub struct Subject<'a> {
    pub name: String,
    pub path: String,
    pub content: String,
    pub extension: &'a str,
}

impl<'a> Subject<'a> {
    pub fn new(artifact: &'a Artifact) -> Self {
        Self {
            name: artifact.name.to_lowercase(),
            path: artifact.relative_path.to_lowercase(),
            content: if artifact.is_file() {
                artifact.content.to_lowercase()
            } else {
                String::new()
            },
            extension: &artifact.extension,
        }
    }
}

/// One predicate inside a rule. A rule matches when any of its matchers does.
#[derive(Debug, Clone)]
pub enum Matcher {
    NameContains(&'static [&'static str]),
    PathContains(&'static [&'static str]),
    ContentContains(&'static [&'static str]),
    ExtensionIn(&'static [&'static str]),
    NamePattern(Regex),
}

impl Matcher {
    /// Returns the terms that hit, each tagged with the field it came from
    fn matches(&self, subject: &Subject<'_>) -> Vec<String> {
        match self {
            Matcher::NameContains(terms) => contained("name", terms, &subject.name),
            Matcher::PathContains(terms) => contained("path", terms, &subject.path),
            Matcher::ContentContains(terms) => contained("content", terms, &subject.content),
            Matcher::ExtensionIn(exts) => exts
                .iter()
                .filter(|e| **e == subject.extension)
                .map(|e| format!("ext:{}", e))
                .collect(),
            Matcher::NamePattern(re) => re
                .find(&subject.name)
                .map(|m| vec![format!("name~{}", m.as_str())])
                .unwrap_or_default(),
        }
    }
}

fn contained(field: &str, terms: &[&str], haystack: &str) -> Vec<String> {
    if haystack.is_empty() {
        return Vec::new();
    }
    terms
        .iter()
        .filter(|t| haystack.contains(**t))
        .map(|t| format!("{}:{}", field, t))
        .collect()
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::NameContains(terms) => write!(f, "name contains {}", terms.join("|")),
            Matcher::PathContains(terms) => write!(f, "path contains {}", terms.join("|")),
            Matcher::ContentContains(terms) => write!(f, "content contains {}", terms.join("|")),
            Matcher::ExtensionIn(exts) => write!(f, "extension in {}", exts.join("|")),
            Matcher::NamePattern(re) => write!(f, "name matches /{}/", re.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pub matchers: Vec<Matcher>,
}

impl Rule {
    pub fn new(name: &'static str, category: Category) -> Self {
        Self {
            name,
            category,
            matchers: Vec::new(),
        }
    }

    pub fn matcher(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// All matched terms across the rule's matchers; empty means no match
    pub fn evaluate(&self, subject: &Subject<'_>) -> Vec<String> {
        self.matchers
            .iter()
            .flat_map(|m| m.matches(subject))
            .collect()
    }
}

/// The canonical rule list, highest priority first.
///
/// Several rules overlap (a `teste_qubit.py` hits both the entanglement test
/// and the core circuit rules); the earlier rule always wins.
pub fn canonical_rules() -> Vec<Rule> {
    use Matcher::*;

    vec![
        Rule::new("backup-artifacts", Category::BackupRestore)
            .matcher(NameContains(&[
                "backup", "bkp", "restore", "restaur", "snapshot",
            ]))
            .matcher(ExtensionIn(&["bak", "orig"]))
            .matcher(PathContains(&["backup/", "backups/"])),
        Rule::new("configuration-files", Category::Configuration)
            .matcher(NameContains(&["config", "settings", "configurac", ".env"]))
            .matcher(ExtensionIn(&[
                "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "env",
            ]))
            .matcher(NamePattern(
                Regex::new(r"^(setup\.py|requirements[\w.-]*\.txt|makefile|dockerfile|procfile)$")
                    .expect("valid regex"),
            )),
        Rule::new("documentation-files", Category::Documentation)
            .matcher(ExtensionIn(&["md", "rst", "txt", "pdf", "adoc", "docx"]))
            .matcher(NameContains(&[
                "readme",
                "license",
                "changelog",
                "contributing",
                "manual",
                "tutorial",
                "guia",
            ]))
            .matcher(PathContains(&["docs/", "doc/"])),
        Rule::new("entanglement-tests", Category::EntanglementTest)
            .matcher(NameContains(&[
                "test", "bell", "entangl", "emaranh", "ghz", "chsh",
            ]))
            .matcher(PathContains(&["tests/"])),
        Rule::new("quantum-circuits", Category::CoreCircuit)
            .matcher(NameContains(&[
                "circuit", "circuito", "qubit", "quantum", "quantic", "gate", "porta",
            ]))
            .matcher(ContentContains(&["qubit", "quantumcircuit", "qiskit", "cirq"])),
        Rule::new("advanced-protocols", Category::AdvancedProtocol)
            .matcher(NameContains(&[
                "protocol",
                "protocolo",
                "teleport",
                "qkd",
                "bb84",
                "e91",
                "crypt",
                "superdense",
            ]))
            .matcher(ContentContains(&["teleport", "bb84"])),
        Rule::new("complex-algorithms", Category::ComplexAlgorithm)
            .matcher(NameContains(&[
                "grover",
                "shor",
                "vqe",
                "qaoa",
                "qft",
                "algorithm",
                "algoritmo",
                "optimiz",
                "otimiz",
            ]))
            .matcher(ContentContains(&["grover", "qft"])),
        Rule::new("user-interfaces", Category::UserInterface)
            .matcher(NameContains(&[
                "gui", "interface", "dashboard", "menu", "painel", "frontend", "_ui", "ui_",
            ]))
            .matcher(ExtensionIn(&["html", "css"]))
            .matcher(ContentContains(&["tkinter", "streamlit", "pyqt"])),
        Rule::new("data-analysis", Category::DataAnalysis)
            .matcher(NameContains(&[
                "analis",
                "analys",
                "analyz",
                "stat",
                "plot",
                "graf",
                "graph",
                "report",
                "relatorio",
                "metric",
            ]))
            .matcher(ExtensionIn(&["csv", "ipynb"]))
            .matcher(ContentContains(&["pandas", "matplotlib", "seaborn"])),
        Rule::new("orchestration-modules", Category::OrchestrationModule)
            .matcher(NameContains(&[
                "orquestr",
                "orchestr",
                "pipeline",
                "manager",
                "gerenciador",
                "executor",
                "runner",
                "scheduler",
                "master",
                "organizador",
                "mapeador",
                "main",
                "run_",
            ]))
            .matcher(ContentContains(&["subprocess"])),
        Rule::new("maintenance-tools", Category::Maintenance).matcher(NameContains(&[
            "clean", "limp", "fix", "corrig", "maint", "manuten", "update", "atualiz", "migrat",
            "repair",
        ])),
    ]
}
