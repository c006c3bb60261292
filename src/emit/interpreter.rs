use serde::{Deserialize, Serialize};

pub const DEFAULT_PYTHON: &str = "python3";

/// Maps runnable extensions to the command that executes them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreters {
    pub python: String,
}

impl Interpreters {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// `None` means the file is executed directly
    pub fn command_for(&self, extension: &str) -> Option<&str> {
        match extension {
            "py" => Some(self.python.as_str()),
            "sh" => Some("sh"),
            "bash" => Some("bash"),
            "js" => Some("node"),
            "rb" => Some("ruby"),
            "pl" => Some("perl"),
            _ => None,
        }
    }
}

impl Default for Interpreters {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::patterns::RUNNABLE_EXTENSIONS;

    #[test]
    fn test_every_runnable_extension_has_interpreter() {
        let interpreters = Interpreters::default();
        for ext in RUNNABLE_EXTENSIONS {
            assert!(interpreters.command_for(ext).is_some(), "missing {}", ext);
        }
        assert_eq!(interpreters.command_for("md"), None);
    }

    #[test]
    fn test_python_is_configurable() {
        let interpreters = Interpreters::new("/opt/py/bin/python3.12");
        assert_eq!(interpreters.command_for("py"), Some("/opt/py/bin/python3.12"));
        assert_eq!(interpreters.command_for("js"), Some("node"));
    }
}
