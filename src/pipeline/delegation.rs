//! One-shot task reassignment

use tracing::{debug, info};

use crate::pipeline::{Task, Worker};

/// Decides where a failed or declined task goes next
///
/// A task is reassigned at most once per run; the coordinator enforces that
/// by only consulting the manager on the first failure.
#[derive(Debug, Default)]
pub struct DelegationManager;

impl DelegationManager {
    pub fn new() -> Self {
        Self
    }

    /// Pick a replacement worker for a task, or None if nobody is eligible
    ///
    /// Eligible workers are those with delegation permission, excluding the
    /// original assignee. The earliest-declared eligible worker wins, so the
    /// decision is deterministic for a given roster.
    pub fn decide<'a>(&self, task: &Task, reason: &str, roster: &'a [Worker], original: &str) -> Option<&'a Worker> {
        let chosen = roster.iter().find(|w| w.allow_delegation && w.role != original);

        match &chosen {
            Some(worker) => {
                info!(task = %task.name, from = %original, to = %worker.role, %reason, "delegation: reassigning");
            }
            None => {
                debug!(task = %task.name, from = %original, %reason, "delegation: no eligible worker");
            }
        }

        chosen
    }
}
