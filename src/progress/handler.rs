//! Progress handler trait and events

use std::fmt;
use std::time::Duration;

/// Pipeline stages, in the order a full run visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scan,
    Sequence,
    Report,
    WriteCatalog,
    WriteReport,
    EmitScripts,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Sequence => "sequence",
            Stage::Report => "report",
            Stage::WriteCatalog => "write-catalog",
            Stage::WriteReport => "write-report",
            Stage::EmitScripts => "emit-scripts",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started { root: String },

    StageStarted { stage: Stage },

    /// `items` is whatever the stage counts: entries, phases, files written
    StageComplete {
        stage: Stage,
        items: usize,
        duration: Duration,
    },

    Completed {
        entries: usize,
        scheduled: usize,
        total_time: Duration,
    },

    Failed { stage: Stage, error: String },
}

pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        stages: Mutex<Vec<Stage>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            if let ProgressEvent::StageComplete { stage, .. } = event {
                self.stages.lock().unwrap().push(*stage);
            }
        }
    }

    #[test]
    fn test_handler_receives_events() {
        let handler = RecordingHandler::default();
        handler.on_progress(&ProgressEvent::StageStarted { stage: Stage::Scan });
        handler.on_progress(&ProgressEvent::StageComplete {
            stage: Stage::Scan,
            items: 4,
            duration: Duration::from_millis(3),
        });
        handler.on_progress(&ProgressEvent::StageComplete {
            stage: Stage::Sequence,
            items: 9,
            duration: Duration::from_millis(1),
        });

        assert_eq!(
            *handler.stages.lock().unwrap(),
            vec![Stage::Scan, Stage::Sequence]
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::WriteCatalog.to_string(), "write-catalog");
        assert_eq!(Stage::EmitScripts.as_str(), "emit-scripts");
    }
}
