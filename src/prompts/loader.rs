//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::pipeline::TaskGraph;

/// A named upstream output included in a task prompt
#[derive(Debug, Clone, Serialize)]
pub struct ContextBlock {
    pub name: String,
    pub output: String,
}

/// Context for rendering a worker's system prompt
#[derive(Debug, Clone, Serialize)]
pub struct RoleContext {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub may_delegate: bool,
}

/// Context for rendering a task's user prompt
#[derive(Debug, Clone, Serialize)]
pub struct TaskPromptContext {
    pub concept: String,
    pub name: String,
    pub description: String,
    pub expected_output: String,
    /// Upstream outputs in the task's declared context order
    pub context_blocks: Vec<ContextBlock>,
    /// The worker's own earlier outputs this run, when memory is enabled
    pub memory_blocks: Vec<ContextBlock>,
}

#[derive(Debug, Clone, Serialize)]
struct ManagerTaskEntry {
    name: String,
    description: String,
    deps: String,
}

/// Context for rendering the manager ordering prompt
#[derive(Debug, Clone, Serialize)]
pub struct ManagerContext {
    concept: String,
    tasks: Vec<ManagerTaskEntry>,
}

impl ManagerContext {
    pub fn for_ordering(graph: &TaskGraph, concept: &str) -> Self {
        let tasks = graph
            .tasks()
            .iter()
            .map(|t| ManagerTaskEntry {
                name: t.name.clone(),
                description: t.description.clone(),
                deps: t.context.join(", "),
            })
            .collect();

        Self {
            concept: concept.to_string(),
            tasks,
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.saga/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let user_dir = root.join(".saga/prompts");
        let repo_dir = root.join("prompts");

        Self {
            hbs: Handlebars::new(),
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
            repo_dir: if repo_dir.exists() { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.saga/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        // Try user override first
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        // Try repo default
        if let Some(ref repo_dir) = self.repo_dir {
            let path = repo_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from repo: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read repo prompt {}: {}", path.display(), e));
            }
        }

        // Fall back to embedded
        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self.load_template(template_name)?;

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}

impl Clone for PromptLoader {
    fn clone(&self) -> Self {
        Self {
            hbs: Handlebars::new(),
            user_dir: self.user_dir.clone(),
            repo_dir: self.repo_dir.clone(),
        }
    }
}
