//! Workers and the per-task attempt loop

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::llm::{GenerationBackend, GenerationError, GenerationRequest};
use crate::tools::Tool;

/// Delay between generation attempts within a task
const RETRY_PAUSE_MS: u64 = 500;

/// First-line marker a permitted worker uses to decline a task
const DECLINE_MARKER: &str = "DELEGATE:";

/// Per-worker generation overrides
///
/// Unset fields fall back to the run-wide LLM config.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// The result of a worker attempting a task
#[derive(Debug, Clone)]
pub enum WorkerOutcome {
    /// Accepted output text
    Output(String),
    /// The worker declined and asked for reassignment (hierarchical only)
    Declined(String),
}

/// A role-specialized worker
///
/// Workers are configuration records: role identity, prompt persona, and
/// execution limits. They hold no mutable state and can be reused across runs.
#[derive(Clone)]
pub struct Worker {
    /// Unique role label within the roster
    pub role: String,

    /// What this worker is trying to achieve
    pub goal: String,

    /// Persona text included in the system prompt
    pub backstory: String,

    /// Maximum generation attempts per task (>= 1)
    pub iteration_limit: u32,

    /// Include the worker's earlier outputs from this run in its prompts
    pub memory: bool,

    /// May receive reassigned tasks, and may decline tasks under
    /// hierarchical coordination
    pub allow_delegation: bool,

    /// Generation overrides for this worker
    pub options: GenerationOptions,

    /// Tool invoked on this worker's accepted outputs
    pub tool: Option<Arc<dyn Tool>>,
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("role", &self.role)
            .field("iteration_limit", &self.iteration_limit)
            .field("memory", &self.memory)
            .field("allow_delegation", &self.allow_delegation)
            .field("tool", &self.tool.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl Worker {
    pub fn new(role: impl Into<String>, goal: impl Into<String>, backstory: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            iteration_limit: 3,
            memory: false,
            allow_delegation: false,
            options: GenerationOptions::default(),
            tool: None,
        }
    }

    pub fn with_iteration_limit(mut self, limit: u32) -> Self {
        self.iteration_limit = limit.max(1);
        self
    }

    pub fn with_memory(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn with_delegation(mut self) -> Self {
        self.allow_delegation = true;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Attempt a task, retrying transient backend failures
    ///
    /// Retries up to `iteration_limit` attempts on retryable errors, pausing
    /// briefly between attempts (or for the server's backoff hint after a
    /// rate limit). Non-retryable errors and exhaustion surface the last
    /// backend error to the caller.
    ///
    /// When `may_delegate` is set, a response whose first line starts with
    /// `DELEGATE:` is surfaced as [`WorkerOutcome::Declined`] instead of
    /// output.
    pub async fn execute(
        &self,
        backend: &dyn GenerationBackend,
        system_prompt: &str,
        prompt: &str,
        may_delegate: bool,
        defaults: &LlmConfig,
    ) -> Result<WorkerOutcome, GenerationError> {
        let model = self.options.model.as_deref().unwrap_or(&defaults.model);
        let max_tokens = self.options.max_tokens.unwrap_or(defaults.max_tokens);
        let temperature = self.options.temperature.unwrap_or(defaults.temperature);

        let mut last_error = None;
        let mut pause = Duration::from_millis(RETRY_PAUSE_MS);
        for attempt in 1..=self.iteration_limit {
            if attempt > 1 {
                tokio::time::sleep(pause).await;
            }

            debug!(role = %self.role, attempt, limit = self.iteration_limit, "execute: attempt");

            let request = GenerationRequest::new(system_prompt, prompt, model)
                .with_max_tokens(max_tokens)
                .with_temperature(temperature);

            match backend.generate(request).await {
                Ok(response) => {
                    if may_delegate && self.allow_delegation
                        && let Some(reason) = decline_reason(&response.text)
                    {
                        debug!(role = %self.role, %reason, "execute: declined");
                        return Ok(WorkerOutcome::Declined(reason));
                    }
                    return Ok(WorkerOutcome::Output(response.text));
                }
                Err(e) if e.is_retryable() && attempt < self.iteration_limit => {
                    warn!(role = %self.role, attempt, error = %e, "execute: retryable failure");
                    // A rate-limited response carries the server's backoff hint
                    pause = e.retry_after().unwrap_or(Duration::from_millis(RETRY_PAUSE_MS));
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| GenerationError::InvalidResponse("no attempts made".to_string())))
    }
}

/// Extract the decline reason if the first line carries the marker
fn decline_reason(text: &str) -> Option<String> {
    let first_line = text.trim_start().lines().next()?;
    first_line
        .strip_prefix(DECLINE_MARKER)
        .map(|reason| reason.trim().to_string())
}
