//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info};

/// Forwards progress events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { root } => {
                info!(root = %root, "Starting execution planning");
            }
            ProgressEvent::StageStarted { stage } => {
                debug!(stage = %stage, "Starting stage");
            }
            ProgressEvent::StageComplete {
                stage,
                items,
                duration,
            } => {
                info!(
                    stage = %stage,
                    items,
                    duration_ms = duration.as_millis() as u64,
                    "Stage complete"
                );
            }
            ProgressEvent::Completed {
                entries,
                scheduled,
                total_time,
            } => {
                info!(
                    entries,
                    scheduled,
                    total_time_ms = total_time.as_millis() as u64,
                    "Execution planning complete"
                );
            }
            ProgressEvent::Failed { stage, error } => {
                error!(stage = %stage, error = %error, "Execution planning failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Stage;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;
        let events = vec![
            ProgressEvent::Started {
                root: "/lab".to_string(),
            },
            ProgressEvent::StageStarted { stage: Stage::Scan },
            ProgressEvent::StageComplete {
                stage: Stage::Scan,
                items: 2,
                duration: Duration::from_millis(5),
            },
            ProgressEvent::Completed {
                entries: 2,
                scheduled: 1,
                total_time: Duration::from_millis(9),
            },
            ProgressEvent::Failed {
                stage: Stage::EmitScripts,
                error: "disk full".to_string(),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
