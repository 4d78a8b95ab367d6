//! Execution ordering strategies

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::llm::{GenerationBackend, GenerationRequest};
use crate::pipeline::TaskGraph;
use crate::prompts::{self, ManagerContext, PromptLoader};

/// Decides the execution order for a validated graph
///
/// Strategies may consult an LLM but must always return a valid order; the
/// graph's fixed topological order is the safe fallback.
#[async_trait]
pub trait OrderingStrategy: Send + Sync {
    async fn order(&self, graph: &TaskGraph, concept: &str) -> Vec<usize>;
}

/// The graph's own deterministic topological order
pub struct FixedTopological;

#[async_trait]
impl OrderingStrategy for FixedTopological {
    async fn order(&self, graph: &TaskGraph, _concept: &str) -> Vec<usize> {
        graph.resolved_order().to_vec()
    }
}

/// Order proposed by a manager LLM, validated against the graph
///
/// The manager sees the task list with dependencies and proposes a
/// comma-separated order of task names. Unparseable or dependency-violating
/// proposals fall back to the fixed topological order.
pub struct ManagerDirected {
    backend: Arc<dyn GenerationBackend>,
    loader: PromptLoader,
    model: String,
}

impl ManagerDirected {
    pub fn new(backend: Arc<dyn GenerationBackend>, loader: PromptLoader, model: impl Into<String>) -> Self {
        Self {
            backend,
            loader,
            model: model.into(),
        }
    }

    fn parse_proposal(&self, graph: &TaskGraph, text: &str) -> Option<Vec<usize>> {
        // The manager may wrap the list in prose; take the first line that
        // resolves entirely to known task names.
        for line in text.lines() {
            let names: Vec<&str> = line.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
            if names.is_empty() {
                continue;
            }
            let indices: Option<Vec<usize>> = names.iter().map(|n| graph.index_of(n)).collect();
            if let Some(indices) = indices {
                return Some(indices);
            }
        }
        None
    }
}

#[async_trait]
impl OrderingStrategy for ManagerDirected {
    async fn order(&self, graph: &TaskGraph, concept: &str) -> Vec<usize> {
        let fallback = graph.resolved_order().to_vec();

        let context = ManagerContext::for_ordering(graph, concept);
        let prompt = match self.loader.render(prompts::MANAGER_ORDER_TEMPLATE, &context) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "manager ordering: template failed, using fixed order");
                return fallback;
            }
        };

        let request = GenerationRequest::new(prompts::manager_system_prompt(), prompt, &self.model)
            .with_temperature(0.0)
            .with_max_tokens(1024);

        let response = match self.backend.generate(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "manager ordering: generation failed, using fixed order");
                return fallback;
            }
        };

        match self.parse_proposal(graph, &response.text) {
            Some(proposed) if graph.validate_order(&proposed) => {
                debug!(?proposed, "manager ordering: proposal accepted");
                proposed
            }
            Some(_) => {
                warn!("manager ordering: proposal violates dependencies, using fixed order");
                fallback
            }
            None => {
                warn!("manager ordering: unparseable proposal, using fixed order");
                fallback
            }
        }
    }
}
