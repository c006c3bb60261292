//! Command handlers. Each returns the process exit code.

use super::commands::{CatalogArgs, PlanArgs, RulesArgs, RunArgs, ScanArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::classify::Classifier;
use crate::config::PlanConfig;
use crate::pipeline::{PipelineError, PipelineOrchestrator, EXIT_OK, EXIT_OUTPUT, EXIT_USAGE};
use crate::plan::PhaseSequencer;
use crate::progress::LoggingHandler;
use anyhow::{Context, Result};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};

fn resolve_root(scan: &ScanArgs) -> Result<PathBuf> {
    match &scan.path {
        Some(path) => Ok(path.clone()),
        None => env::current_dir().context("Failed to determine current directory"),
    }
}

/// Environment configuration with the scan flags applied on top
fn load_config(scan: &ScanArgs) -> Option<PlanConfig> {
    let mut config = match PlanConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return None;
        }
    };

    if scan.gitignore {
        config.respect_gitignore = true;
    }
    if scan.max_depth.is_some() {
        config.max_depth = scan.max_depth;
    }
    Some(config)
}

fn validated(config: PlanConfig) -> Option<PlanConfig> {
    match config.validate() {
        Ok(()) => Some(config),
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            eprintln!("\nPlease check your PHASEPLAN_* environment variables and command-line arguments.");
            None
        }
    }
}

fn report_failure(e: &PipelineError) -> i32 {
    error!("{}", e);
    eprintln!("Error: {}", e);
    e.exit_code()
}

fn write_stdout(output: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

fn print_output(output: &str) -> i32 {
    match write_stdout(output) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!("Failed to write to stdout: {}", e);
            EXIT_OUTPUT
        }
    }
}

pub fn handle_run(args: &RunArgs, quiet: bool) -> i32 {
    let root = match resolve_root(&args.scan) {
        Ok(root) => root,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_USAGE;
        }
    };
    debug!(root = %root.display(), "Run requested");

    let Some(mut config) = load_config(&args.scan) else {
        return EXIT_USAGE;
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(format) = args.catalog_format {
        config.catalog_format = format.into();
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(python) = &args.python {
        config.python = python.clone();
    }
    if args.no_scripts {
        config.emit_scripts = false;
    }
    let Some(config) = validated(config) else {
        return EXIT_USAGE;
    };

    let orchestrator = PipelineOrchestrator::new(config).with_progress(Box::new(LoggingHandler));
    match orchestrator.run(&root) {
        Ok(summary) => {
            info!(
                catalog = %summary.catalog_path.display(),
                report = %summary.report_path.display(),
                "Outputs written"
            );
            if quiet {
                EXIT_OK
            } else {
                let formatter = OutputFormatter::new(OutputFormat::Human);
                print_output(&formatter.format_run_summary(&summary))
            }
        }
        Err(e) => report_failure(&e),
    }
}

pub fn handle_catalog(args: &CatalogArgs) -> i32 {
    let root = match resolve_root(&args.scan) {
        Ok(root) => root,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_USAGE;
        }
    };

    let Some(config) = load_config(&args.scan).and_then(validated) else {
        return EXIT_USAGE;
    };

    let orchestrator = PipelineOrchestrator::new(config);
    let (catalog, _) = match orchestrator.build_catalog(&root) {
        Ok(built) => built,
        Err(e) => return report_failure(&e),
    };

    let document = catalog.document(chrono::Utc::now());
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_catalog(&document) {
        Ok(output) => print_output(&output),
        Err(e) => {
            error!("{:#}", e);
            EXIT_OUTPUT
        }
    }
}

pub fn handle_plan(args: &PlanArgs) -> i32 {
    let root = match resolve_root(&args.scan) {
        Ok(root) => root,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_USAGE;
        }
    };

    let Some(mut config) = load_config(&args.scan) else {
        return EXIT_USAGE;
    };
    if let Some(top) = args.top {
        config.top_n = top;
    }
    let Some(config) = validated(config) else {
        return EXIT_USAGE;
    };

    let analysis = match PipelineOrchestrator::new(config).analyze(&root) {
        Ok(analysis) => analysis,
        Err(e) => return report_failure(&e),
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_plan(&analysis.report, analysis.generated_at) {
        Ok(output) => print_output(&output),
        Err(e) => {
            error!("{:#}", e);
            EXIT_OUTPUT
        }
    }
}

pub fn handle_rules(args: &RulesArgs) -> i32 {
    let classifier = Classifier::canonical();
    let sequencer = PhaseSequencer::canonical();

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_rules(classifier.rules(), sequencer.definitions()) {
        Ok(output) => print_output(&output),
        Err(e) => {
            error!("{:#}", e);
            EXIT_OUTPUT
        }
    }
}
