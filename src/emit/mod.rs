//! Runnable script emission
//!
//! Writes one `phase_NN.sh` per phase and a `run_all_phases.sh` master script
//! into the output directory. Both levels are fail-fast: the first non-zero
//! exit stops the script and becomes its exit status.

mod interpreter;
mod script;

pub use interpreter::{Interpreters, DEFAULT_PYTHON};
pub use script::{
    phase_script_name, render_master_script, render_phase_script, shell_quote,
    MASTER_SCRIPT_NAME,
};

use crate::catalog::Catalog;
use crate::plan::ExecutionPlan;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write script {path}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to mark script {path} executable: {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedScripts {
    pub phase_scripts: Vec<PathBuf>,
    pub master_script: PathBuf,
}

impl EmittedScripts {
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.phase_scripts
            .iter()
            .chain(std::iter::once(&self.master_script))
    }
}

pub struct ScriptEmitter {
    output_dir: PathBuf,
    interpreters: Interpreters,
}

impl ScriptEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            interpreters: Interpreters::default(),
        }
    }

    pub fn with_interpreters(mut self, interpreters: Interpreters) -> Self {
        self.interpreters = interpreters;
        self
    }

    pub fn emit(
        &self,
        catalog: &Catalog,
        plan: &ExecutionPlan,
    ) -> Result<EmittedScripts, EmitError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| EmitError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut phase_scripts = Vec::with_capacity(plan.len());
        for phase in &plan.phases {
            let path = self.output_dir.join(phase_script_name(phase.index));
            let body = render_phase_script(phase, catalog, &self.interpreters);
            write_script(&path, &body)?;
            debug!(path = %path.display(), entries = phase.len(), "Phase script written");
            phase_scripts.push(path);
        }

        let master_script = self.output_dir.join(MASTER_SCRIPT_NAME);
        write_script(&master_script, &render_master_script(plan))?;

        info!(
            output_dir = %self.output_dir.display(),
            phase_scripts = phase_scripts.len(),
            "Scripts emitted"
        );

        Ok(EmittedScripts {
            phase_scripts,
            master_script,
        })
    }
}

fn write_script(path: &Path, body: &str) -> Result<(), EmitError> {
    fs::write(path, body).map_err(|source| EmitError::ScriptWrite {
        path: path.to_path_buf(),
        source,
    })?;
    make_executable(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), EmitError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
        EmitError::Permissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), EmitError> {
    Ok(())
}
