//! Prompt templates and rendering

pub mod embedded;
pub mod loader;

pub use loader::{ContextBlock, ManagerContext, PromptLoader, RoleContext, TaskPromptContext};

/// Template name for the worker system prompt
pub const WORKER_SYSTEM_TEMPLATE: &str = "worker-system";

/// Template name for the task user prompt
pub const TASK_PROMPT_TEMPLATE: &str = "task-prompt";

/// Template name for the manager ordering prompt
pub const MANAGER_ORDER_TEMPLATE: &str = "manager-order";

/// System prompt for the hierarchical manager
pub fn manager_system_prompt() -> &'static str {
    embedded::MANAGER_SYSTEM
}
