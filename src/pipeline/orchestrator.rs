use super::PipelineError;
use crate::catalog::Catalog;
use crate::classify::Classifier;
use crate::config::PlanConfig;
use crate::emit::{EmittedScripts, ScriptEmitter};
use crate::plan::{ExecutionPlan, PhaseSequencer};
use crate::progress::{ProgressEvent, ProgressHandler, Stage};
use crate::report::{Report, ReportGenerator};
use crate::scan::Scanner;
use crate::score::ComplexityScorer;
use chrono::{DateTime, Utc};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub const REPORT_FILE_NAME: &str = "report.txt";

/// Everything computed for one root, before anything is written
#[derive(Debug, Clone)]
pub struct Analysis {
    pub catalog: Catalog,
    pub plan: ExecutionPlan,
    pub report: Report,
    pub output_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub analysis: Analysis,
    pub catalog_path: PathBuf,
    pub report_path: PathBuf,
    /// `None` when script emission was disabled
    pub scripts: Option<EmittedScripts>,
}

pub struct PipelineOrchestrator {
    config: PlanConfig,
    classifier: Classifier,
    scorer: ComplexityScorer,
    sequencer: PhaseSequencer,
    progress_handler: Option<Box<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    /// Orchestrator over the canonical rules and phase definitions
    pub fn new(config: PlanConfig) -> Self {
        Self {
            config,
            classifier: Classifier::canonical(),
            scorer: ComplexityScorer::default(),
            sequencer: PhaseSequencer::canonical(),
            progress_handler: None,
        }
    }

    pub fn with_progress(mut self, handler: Box<dyn ProgressHandler>) -> Self {
        self.progress_handler = Some(handler);
        self
    }

    pub fn with_sequencer(mut self, sequencer: PhaseSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    fn notify(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    fn stage<T>(
        &self,
        stage: Stage,
        count: impl Fn(&T) -> usize,
        run: impl FnOnce() -> Result<T, PipelineError>,
    ) -> Result<T, PipelineError> {
        self.notify(ProgressEvent::StageStarted { stage });
        let started = Instant::now();

        match run() {
            Ok(value) => {
                self.notify(ProgressEvent::StageComplete {
                    stage,
                    items: count(&value),
                    duration: started.elapsed(),
                });
                Ok(value)
            }
            Err(e) => {
                self.notify(ProgressEvent::Failed {
                    stage,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Scans `root` and builds the catalog. Returns it with the resolved
    /// output directory, which the walk skipped.
    pub fn build_catalog(&self, root: &Path) -> Result<(Catalog, PathBuf), PipelineError> {
        self.stage(
            Stage::Scan,
            |(catalog, _): &(Catalog, PathBuf)| catalog.len(),
            || {
                let scanner = Scanner::new(root)?;
                let output_dir = absolute(self.config.output_dir_for(scanner.root()));
                let scanner = scanner.with_config(self.config.scan_config(&output_dir));

                let catalog = Catalog::build(
                    scanner.root(),
                    scanner.scan(),
                    &self.classifier,
                    &self.scorer,
                );
                Ok((catalog, output_dir))
            },
        )
    }

    /// Catalog, plan and report for `root`; writes nothing
    pub fn analyze(&self, root: &Path) -> Result<Analysis, PipelineError> {
        let (catalog, output_dir) = self.build_catalog(root)?;

        let plan = self.stage(Stage::Sequence, ExecutionPlan::scheduled_entries, || {
            Ok(self.sequencer.sequence(&catalog))
        })?;

        let report = self.stage(
            Stage::Report,
            |r: &Report| r.specialized.len(),
            || Ok(self.report_generator().generate(&catalog, &plan)),
        )?;

        Ok(Analysis {
            catalog,
            plan,
            report,
            output_dir,
            generated_at: Utc::now(),
        })
    }

    /// Full run: analyze, then write catalog and report, then scripts.
    ///
    /// Nothing is written until the catalog is complete. A script failure
    /// leaves the already written catalog and report in place.
    pub fn run(&self, root: &Path) -> Result<RunSummary, PipelineError> {
        let started = Instant::now();
        self.notify(ProgressEvent::Started {
            root: root.display().to_string(),
        });

        let analysis = self.analyze(root)?;
        let output_dir = analysis.output_dir.clone();

        let format = self.config.catalog_format;
        let catalog_path = self.stage(Stage::WriteCatalog, |_: &PathBuf| 1, || {
            let body = analysis
                .catalog
                .document(analysis.generated_at)
                .render(format)?;
            write_output(&output_dir, format.file_name(), &body)
        })?;

        let report_path = self.stage(Stage::WriteReport, |_: &PathBuf| 1, || {
            let body = analysis.report.render_text(analysis.generated_at);
            write_output(&output_dir, REPORT_FILE_NAME, &body)
        })?;

        let scripts = if self.config.emit_scripts {
            let emitter =
                ScriptEmitter::new(&output_dir).with_interpreters(self.config.interpreters());
            let emitted = self.stage(
                Stage::EmitScripts,
                |s: &EmittedScripts| s.all().count(),
                || Ok(emitter.emit(&analysis.catalog, &analysis.plan)?),
            )?;
            Some(emitted)
        } else {
            debug!("Script emission disabled");
            None
        };

        info!(
            output_dir = %output_dir.display(),
            entries = analysis.catalog.len(),
            scheduled = analysis.plan.scheduled_entries(),
            "Run complete"
        );
        self.notify(ProgressEvent::Completed {
            entries: analysis.catalog.len(),
            scheduled: analysis.plan.scheduled_entries(),
            total_time: started.elapsed(),
        });

        Ok(RunSummary {
            analysis,
            catalog_path,
            report_path,
            scripts,
        })
    }

    fn report_generator(&self) -> ReportGenerator {
        ReportGenerator::new(self.config.top_n, self.config.min_specialized_tier)
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Writes through a sibling temporary file so a reader never sees half a file
fn write_output(dir: &Path, file_name: &str, body: &str) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::OutputWrite {
        path: dir.to_path_buf(),
        source,
    })?;

    let target = dir.join(file_name);
    let staging = dir.join(format!(".{}.partial", file_name));
    fs::write(&staging, body).map_err(|source| PipelineError::OutputWrite {
        path: staging.clone(),
        source,
    })?;
    fs::rename(&staging, &target).map_err(|source| PipelineError::OutputWrite {
        path: target.clone(),
        source,
    })?;

    debug!(path = %target.display(), bytes = body.len(), "Output written");
    Ok(target)
}
