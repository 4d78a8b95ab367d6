//! Pipeline error types

use thiserror::Error;

use crate::llm::GenerationError;
use crate::tools::ToolError;

/// Errors that can occur while building or running a pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("task '{task}' references unknown task '{missing}'")]
    DanglingReference { task: String, missing: String },

    #[error("duplicate task name '{0}'")]
    DuplicateTask(String),

    #[error("cyclic dependency: {}", path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    #[error("task '{task}' has no assigned worker")]
    UnassignedTask { task: String },

    #[error("unknown worker '{worker}' assigned to task '{task}'")]
    UnknownWorker { task: String, worker: String },

    #[error("task '{task}' failed: {source}")]
    TaskExecution {
        task: String,
        #[source]
        source: GenerationError,
    },

    #[error("checkpoint failed for task '{task}': {reason}")]
    Checkpoint { task: String, reason: String },

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("template error: {0}")]
    Template(String),
}

impl Error {
    /// The task name this error is attributed to, if any
    pub fn task_name(&self) -> Option<&str> {
        match self {
            Error::DanglingReference { task, .. }
            | Error::UnassignedTask { task }
            | Error::UnknownWorker { task, .. }
            | Error::TaskExecution { task, .. }
            | Error::Checkpoint { task, .. } => Some(task),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
