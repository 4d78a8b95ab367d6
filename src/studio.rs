//! The script studio: a seven-worker roster and nine-task pipeline that
//! turns a concept into a finished video narration script.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pipeline::{Task, TaskGraph, Worker};
use crate::prompts::{PromptLoader, embedded};
use crate::tools::SaveScriptTool;

// Worker role labels
pub const CONCEPT_DEVELOPER: &str = "Concept Developer";
pub const RESEARCHER: &str = "Researcher";
pub const STAFF_WRITER: &str = "Staff Writer";
pub const VIRALIZER: &str = "Gen Z Viralizer";
pub const SENIOR_WRITER: &str = "Senior Writer";
pub const CRITIC: &str = "Critic";
pub const SENIOR_EDITOR: &str = "Senior Editor";

/// Variables available to the studio task templates
#[derive(Debug, Serialize)]
struct StudioVars<'a> {
    duration: u32,
    requirements: &'static str,
    tone: &'a str,
    writers: &'a str,
    cta: &'a str,
}

impl<'a> StudioVars<'a> {
    fn from_config(config: &'a Config) -> Self {
        Self {
            duration: config.studio.script_duration_secs,
            requirements: embedded::VOICEOVER_REQUIREMENTS,
            tone: &config.studio.tone,
            writers: &config.studio.writers_to_emulate,
            cta: &config.studio.call_to_action,
        }
    }
}

/// Build the studio worker roster
///
/// All workers carry run memory. The writers take reassigned work; the
/// senior editor persists the final script through the save-script tool.
pub fn roster(config: &Config) -> Vec<Worker> {
    let persona = |role: &str, backstory: &str| format!("{role}\n\n{backstory}");
    let limit = config.studio.max_iterations;

    vec![
        Worker::new(
            CONCEPT_DEVELOPER,
            embedded::CONCEPT_DEVELOPER_GOAL,
            persona(embedded::CONCEPT_DEVELOPER_ROLE, embedded::CONCEPT_DEVELOPER_BACKSTORY),
        )
        .with_memory()
        .with_iteration_limit(limit),
        Worker::new(
            RESEARCHER,
            embedded::RESEARCHER_GOAL,
            persona(embedded::RESEARCHER_ROLE, embedded::RESEARCHER_BACKSTORY),
        )
        .with_memory()
        .with_iteration_limit(limit),
        Worker::new(
            STAFF_WRITER,
            embedded::STAFF_WRITER_GOAL,
            persona(embedded::STAFF_WRITER_ROLE, embedded::STAFF_WRITER_BACKSTORY),
        )
        .with_memory()
        .with_delegation()
        .with_iteration_limit(limit),
        Worker::new(
            VIRALIZER,
            embedded::VIRALIZER_GOAL,
            persona(embedded::VIRALIZER_ROLE, embedded::VIRALIZER_BACKSTORY),
        )
        .with_memory()
        .with_iteration_limit(limit),
        Worker::new(
            SENIOR_WRITER,
            embedded::SENIOR_WRITER_GOAL,
            persona(embedded::SENIOR_WRITER_ROLE, embedded::SENIOR_WRITER_BACKSTORY),
        )
        .with_memory()
        .with_delegation()
        .with_iteration_limit(limit),
        Worker::new(
            CRITIC,
            embedded::CRITIC_GOAL,
            persona(embedded::CRITIC_ROLE, embedded::CRITIC_BACKSTORY),
        )
        .with_memory()
        .with_iteration_limit(limit),
        Worker::new(
            SENIOR_EDITOR,
            embedded::SENIOR_EDITOR_GOAL,
            persona(embedded::SENIOR_EDITOR_ROLE, embedded::SENIOR_EDITOR_BACKSTORY),
        )
        .with_memory()
        .with_iteration_limit(limit)
        .with_tool(Arc::new(SaveScriptTool::new(config.studio.output_dir.clone()))),
    ]
}

/// Build the nine-task script pipeline
///
/// The first draft and the final script pause for human review.
pub fn pipeline(config: &Config, loader: &PromptLoader) -> Result<TaskGraph> {
    let vars = StudioVars::from_config(config);

    let render = |name: &str| -> Result<String> {
        loader.render(name, &vars).map_err(|e| Error::Template(e.to_string()))
    };

    let task = |name: &str, template: &str, worker: &str| -> Result<Task> {
        Ok(Task::new(
            name,
            render(&format!("studio-{template}"))?,
            render(&format!("studio-{template}-expected"))?,
        )
        .with_worker(worker))
    };

    let tasks = vec![
        task("script-direction", "direction", CONCEPT_DEVELOPER)?,
        task("research-findings", "research", RESEARCHER)?,
        task("outline", "outline", STAFF_WRITER)?.with_context(vec!["research-findings", "script-direction"]),
        task("first-draft", "first-draft", STAFF_WRITER)?
            .with_context(vec!["outline"])
            .with_checkpoint(),
        task("fact-check", "fact-check", RESEARCHER)?.with_context(vec!["first-draft", "research-findings"]),
        task("viral-draft", "viralize", VIRALIZER)?.with_context(vec!["first-draft"]),
        task("final-draft", "final-draft", SENIOR_WRITER)?.with_context(vec!["viral-draft", "fact-check"]),
        task("script-critique", "critique", CRITIC)?.with_context(vec!["final-draft"]),
        task("final-script", "final-script", SENIOR_EDITOR)?
            .with_context(vec!["final-draft", "script-critique"])
            .with_checkpoint(),
    ];

    TaskGraph::build(tasks)
}
