//! POSIX `sh` script text for phases and the master runner

use super::Interpreters;
use crate::catalog::{Catalog, CatalogEntry};
use crate::plan::{ExecutionPlan, Phase};

pub const MASTER_SCRIPT_NAME: &str = "run_all_phases.sh";

pub fn phase_script_name(index: usize) -> String {
    format!("phase_{:02}.sh", index)
}

/// Single-quotes `value` unless every character is shell-safe
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

fn invocation(entry: &CatalogEntry, interpreters: &Interpreters) -> String {
    let dir = entry.artifact.parent_dir().to_string_lossy().to_string();
    // A leading `./` keeps names such as `-circuit.sh` from parsing as options
    let script = shell_quote(&format!("./{}", entry.artifact.name));
    let command = match interpreters.command_for(&entry.artifact.extension) {
        Some(program) => format!("{} {}", shell_quote(program), script),
        None => script,
    };
    format!("(cd {} && exec {})", shell_quote(&dir), command)
}

fn failure_block(out: &mut String, message: &str) {
    out.push_str(" || {\n");
    out.push_str("    status=$?\n");
    out.push_str(&format!(
        "    echo {} \"(exit $status)\" >&2\n",
        shell_quote(message)
    ));
    out.push_str("    exit \"$status\"\n");
    out.push_str("}\n");
}

/// One phase: entries run in plan order, the first non-zero exit stops the
/// script with that status. An empty phase reports and exits 0.
pub fn render_phase_script(
    phase: &Phase,
    catalog: &Catalog,
    interpreters: &Interpreters,
) -> String {
    let label = format!("Phase {:02}: {}", phase.index, phase.name);
    let entries: Vec<&CatalogEntry> = phase
        .entries
        .iter()
        .filter_map(|&i| catalog.get(i))
        .collect();

    let mut out = String::from("#!/bin/sh\n");
    out.push_str(&format!("# {} {}\n", crate::NAME, label));
    out.push_str(&format!(
        "# Entries: {} (capacity {})\n",
        entries.len(),
        phase.capacity
    ));
    out.push_str("set -u\n\n");

    if entries.is_empty() {
        out.push_str(&format!(
            "echo {}\n",
            shell_quote(&format!("==> {} has no entries", label))
        ));
        out.push_str("exit 0\n");
        return out;
    }

    out.push_str(&format!(
        "echo {}\n\n",
        shell_quote(&format!("==> {} ({} entries)", label, entries.len()))
    ));

    let total = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let path = &entry.artifact.relative_path;
        out.push_str(&format!(
            "echo {}\n",
            shell_quote(&format!("--> [{}/{}] {}", i + 1, total, path))
        ));
        out.push_str(&invocation(entry, interpreters));
        failure_block(&mut out, &format!("{} failed at {}", label, path));
        out.push('\n');
    }

    out.push_str(&format!(
        "echo {}\n",
        shell_quote(&format!("==> {} complete", label))
    ));
    out.push_str("exit 0\n");
    out
}

/// Runs every phase script from its own directory, in plan order, stopping at
/// the first failing phase
pub fn render_master_script(plan: &ExecutionPlan) -> String {
    let total = plan.len();

    let mut out = String::from("#!/bin/sh\n");
    out.push_str(&format!("# {} master script: {} phases\n", crate::NAME, total));
    out.push_str("set -u\n");
    out.push_str("SCRIPT_DIR=$(CDPATH= cd -- \"$(dirname -- \"$0\")\" && pwd)\n\n");

    for (i, phase) in plan.phases.iter().enumerate() {
        let script = phase_script_name(phase.index);
        out.push_str(&format!(
            "echo {}\n",
            shell_quote(&format!("==> [{}/{}] {} ({})", i + 1, total, script, phase.name))
        ));
        out.push_str(&format!("sh \"$SCRIPT_DIR/{}\"", script));
        failure_block(
            &mut out,
            &format!("Phase {:02} ({}) failed", phase.index, phase.name),
        );
        out.push('\n');
    }

    out.push_str(&format!(
        "echo {}\n",
        shell_quote(&format!("==> All {} phases completed", total))
    ));
    out.push_str("exit 0\n");
    out
}
