//! Directory deny-list and text allow-list used while scanning

/// Infrastructure directories that are never descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".hg",
    ".svn",
    // Dependency caches
    "node_modules",
    "__pycache__",
    "venv",
    ".venv",
    ".tox",
    ".eggs",
    "site-packages",
    // Editor and tool caches
    ".idea",
    ".vscode",
    ".vs",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".ipynb_checkpoints",
];

/// Extensions whose content is read as text
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "pyw", "sh", "bash", "js", "ts", "rb", "pl", "rs", "go", "java", "c", "h", "cpp", "hpp",
    "md", "rst", "txt", "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "env", "html", "css",
    "csv", "ipynb", "sql", "xml",
];

/// Extension-less file names that are still read as text
pub const TEXT_FILE_NAMES: &[&str] = &["makefile", "dockerfile", "readme", "license", "procfile"];

/// Extensions that can be invoked through a known interpreter
pub const RUNNABLE_EXTENSIONS: &[&str] = &["py", "sh", "bash", "js", "rb", "pl"];

/// Fixed names of the files a run writes into its output directory
pub const GENERATED_FILE_NAMES: &[&str] = &[
    "catalog.json",
    "catalog.yaml",
    "report.txt",
    "run_all_phases.sh",
];

/// Default upper bound for reading a file's content
pub const DEFAULT_MAX_READ_BYTES: u64 = 1024 * 1024;

/// Checks if a directory name is on the deny-list
pub fn is_excluded_dir_name(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name) || name.ends_with(".egg-info")
}

/// Checks if a file should have its content read
pub fn is_text_candidate(name: &str, extension: &str) -> bool {
    if extension.is_empty() {
        return TEXT_FILE_NAMES.contains(&name.to_lowercase().as_str());
    }
    TEXT_EXTENSIONS.contains(&extension)
}

pub fn is_runnable_extension(extension: &str) -> bool {
    RUNNABLE_EXTENSIONS.contains(&extension)
}

/// Checks if a file name is one a run writes: a fixed output name,
/// `phase_NN.sh`, or the `.{name}.partial` staging file of either
pub fn is_generated_file_name(name: &str) -> bool {
    let name = name
        .strip_prefix('.')
        .and_then(|n| n.strip_suffix(".partial"))
        .unwrap_or(name);

    if GENERATED_FILE_NAMES.contains(&name) {
        return true;
    }

    name.strip_prefix("phase_")
        .and_then(|n| n.strip_suffix(".sh"))
        .map_or(false, |digits| {
            digits.len() >= 2 && digits.chars().all(|c| c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_excluded_dir_name() {
        assert!(is_excluded_dir_name(".git"));
        assert!(is_excluded_dir_name("node_modules"));
        assert!(is_excluded_dir_name("__pycache__"));
        assert!(is_excluded_dir_name(".vscode"));
        assert!(is_excluded_dir_name("phaseplan.egg-info"));
        assert!(!is_excluded_dir_name("src"));
        assert!(!is_excluded_dir_name("tests"));
        assert!(!is_excluded_dir_name(".config"));
    }

    #[test]
    fn test_is_generated_file_name() {
        assert!(is_generated_file_name("catalog.json"));
        assert!(is_generated_file_name("catalog.yaml"));
        assert!(is_generated_file_name("report.txt"));
        assert!(is_generated_file_name("run_all_phases.sh"));
        assert!(is_generated_file_name("phase_01.sh"));
        assert!(is_generated_file_name("phase_123.sh"));
        assert!(is_generated_file_name(".catalog.json.partial"));
        assert!(is_generated_file_name(".report.txt.partial"));
        assert!(!is_generated_file_name("phase_1.sh"));
        assert!(!is_generated_file_name("phase_ab.sh"));
        assert!(!is_generated_file_name("phase_01.py"));
        assert!(!is_generated_file_name("catalog.txt"));
        assert!(!is_generated_file_name(".notes.partial"));
    }

    #[test]
    fn test_is_text_candidate() {
        assert!(is_text_candidate("main.py", "py"));
        assert!(is_text_candidate("README.md", "md"));
        assert!(is_text_candidate("Makefile", ""));
        assert!(!is_text_candidate("logo.png", "png"));
        assert!(!is_text_candidate("model.bin", "bin"));
        assert!(!is_text_candidate("data", ""));
    }

    #[test]
    fn test_is_runnable_extension() {
        assert!(is_runnable_extension("py"));
        assert!(is_runnable_extension("sh"));
        assert!(!is_runnable_extension("md"));
        assert!(!is_runnable_extension(""));
    }
}
