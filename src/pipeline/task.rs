//! Task definitions

use serde::{Deserialize, Serialize};

/// A single unit of work in a pipeline
///
/// Tasks reference their upstream context by name. The declared order of
/// `context` is the order in which upstream outputs are concatenated into the
/// prompt, regardless of when those tasks actually completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique name within the pipeline
    pub name: String,

    /// What the worker is asked to do
    pub description: String,

    /// Contract describing what the output should look like
    #[serde(rename = "expected-output")]
    pub expected_output: String,

    /// Role of the worker assigned to this task
    ///
    /// Optional under hierarchical coordination, where the manager assigns
    /// unbound tasks at execution time.
    #[serde(default)]
    pub worker: Option<String>,

    /// Names of upstream tasks whose outputs feed this task, in declared order
    #[serde(default)]
    pub context: Vec<String>,

    /// Pause for human review before the output is accepted
    #[serde(default, rename = "human-checkpoint")]
    pub human_checkpoint: bool,

    /// Marks the task as safe to run concurrently with other independent tasks
    ///
    /// Declarative only. The coordinator executes one task at a time; two
    /// tasks with no dependency relationship may run concurrently if a
    /// parallel scheduler is ever introduced.
    #[serde(default, rename = "async")]
    pub async_execution: bool,
}

impl Task {
    pub fn new(name: impl Into<String>, description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            worker: None,
            context: Vec::new(),
            human_checkpoint: false,
            async_execution: false,
        }
    }

    pub fn with_worker(mut self, role: impl Into<String>) -> Self {
        self.worker = Some(role.into());
        self
    }

    pub fn with_context(mut self, context: Vec<&str>) -> Self {
        self.context = context.into_iter().map(String::from).collect();
        self
    }

    pub fn with_checkpoint(mut self) -> Self {
        self.human_checkpoint = true;
        self
    }

    pub fn with_async(mut self) -> Self {
        self.async_execution = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("draft", "Write the draft", "A complete draft")
            .with_worker("writer")
            .with_context(vec!["outline", "research"])
            .with_checkpoint();

        assert_eq!(task.name, "draft");
        assert_eq!(task.worker.as_deref(), Some("writer"));
        assert_eq!(task.context, vec!["outline", "research"]);
        assert!(task.human_checkpoint);
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("t", "d", "e");
        assert!(task.worker.is_none());
        assert!(task.context.is_empty());
        assert!(!task.human_checkpoint);
        assert!(!task.async_execution);
    }

    #[test]
    fn test_task_deserializes_kebab_case() {
        let yaml = r#"
name: draft
description: Write the draft
expected-output: A complete draft
human-checkpoint: true
async: true
"#;
        let task: Task = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(task.name, "draft");
        assert!(task.human_checkpoint);
        assert!(task.async_execution);
    }
}
