//! Pipeline lifecycle events

use tracing::{info, warn};

/// Observer for pipeline lifecycle events
///
/// All hooks default to no-ops so sinks implement only what they care about.
/// Hooks are synchronous and should not block.
pub trait EventSink: Send + Sync {
    fn on_run_start(&self, _concept: &str, _task_count: usize) {}
    fn on_task_start(&self, _task: &str, _worker: &str) {}
    fn on_task_complete(&self, _task: &str, _worker: &str, _output: &str) {}
    fn on_task_failed(&self, _task: &str, _reason: &str) {}
    fn on_delegation(&self, _task: &str, _from: &str, _to: &str, _reason: &str) {}
    fn on_checkpoint(&self, _task: &str) {}
}

/// Sink that discards all events
pub struct NullSink;

impl EventSink for NullSink {}

/// Sink that reports events through tracing
pub struct LogSink;

impl EventSink for LogSink {
    fn on_run_start(&self, concept: &str, task_count: usize) {
        info!(%concept, task_count, "pipeline run started");
    }

    fn on_task_start(&self, task: &str, worker: &str) {
        info!(%task, %worker, "task started");
    }

    fn on_task_complete(&self, task: &str, worker: &str, output: &str) {
        info!(%task, %worker, output_chars = output.len(), "task completed");
    }

    fn on_task_failed(&self, task: &str, reason: &str) {
        warn!(%task, %reason, "task failed");
    }

    fn on_delegation(&self, task: &str, from: &str, to: &str, reason: &str) {
        info!(%task, %from, %to, %reason, "task reassigned");
    }

    fn on_checkpoint(&self, task: &str) {
        info!(%task, "waiting for human checkpoint");
    }
}
