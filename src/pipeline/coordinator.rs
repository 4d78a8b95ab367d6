//! Pipeline execution

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::checkpoint::{AutoApprove, CheckpointHandler, Decision};
use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::llm::{GenerationBackend, GenerationError};
use crate::pipeline::events::{EventSink, LogSink};
use crate::pipeline::ordering::{FixedTopological, ManagerDirected, OrderingStrategy};
use crate::pipeline::{DelegationManager, Task, TaskGraph, Worker, WorkerOutcome};
use crate::prompts::{self, ContextBlock, PromptLoader, RoleContext, TaskPromptContext};

/// How tasks are sequenced and assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Declared order (validated), workers fixed at declaration
    Sequential,
    /// Manager-directed order and assignment, with one-shot reassignment
    Hierarchical,
}

/// The accepted outputs of a completed run
#[derive(Debug, Clone)]
pub struct RunOutput {
    outputs: Vec<(String, String)>,
    final_output: String,
}

impl RunOutput {
    /// Accepted output of a task by name
    pub fn get(&self, task: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(name, _)| name == task)
            .map(|(_, output)| output.as_str())
    }

    /// All accepted outputs in execution order
    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    /// Output of the terminal task
    pub fn final_output(&self) -> &str {
        &self.final_output
    }
}

/// Runs a task graph to completion over a worker roster
pub struct Coordinator {
    workers: Vec<Worker>,
    policy: Policy,
    backend: Arc<dyn GenerationBackend>,
    llm: LlmConfig,
    loader: PromptLoader,
    checkpoint: Arc<dyn CheckpointHandler>,
    events: Arc<dyn EventSink>,
    delegation: DelegationManager,
}

impl Coordinator {
    pub fn new(workers: Vec<Worker>, policy: Policy, backend: Arc<dyn GenerationBackend>, llm: LlmConfig) -> Self {
        Self {
            workers,
            policy,
            backend,
            llm,
            loader: PromptLoader::embedded_only(),
            checkpoint: Arc::new(AutoApprove),
            events: Arc::new(LogSink),
            delegation: DelegationManager::new(),
        }
    }

    pub fn with_loader(mut self, loader: PromptLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_checkpoint(mut self, handler: Arc<dyn CheckpointHandler>) -> Self {
        self.checkpoint = handler;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Execute every task in the graph and return the accepted outputs
    ///
    /// Tasks run one at a time. A task never starts before all tasks in its
    /// declared context have accepted outputs. The run aborts on the first
    /// permanent task failure, leaving earlier accepted outputs untouched.
    pub async fn run(&self, graph: &TaskGraph, concept: &str) -> Result<RunOutput> {
        self.events.on_run_start(concept, graph.len());
        self.check_assignments(graph)?;

        let order = match self.policy {
            Policy::Sequential => FixedTopological.order(graph, concept).await,
            Policy::Hierarchical => {
                ManagerDirected::new(self.backend.clone(), self.loader.clone(), &self.llm.manager_model)
                    .order(graph, concept)
                    .await
            }
        };

        let hierarchical = self.policy == Policy::Hierarchical;
        let mut outputs: HashMap<usize, String> = HashMap::new();
        let mut record: Vec<(String, String)> = Vec::new();
        let mut memory: HashMap<String, Vec<ContextBlock>> = HashMap::new();

        for &idx in &order {
            let task = graph.task(idx);
            let worker = self.assign_worker(task)?;
            self.events.on_task_start(&task.name, &worker.role);

            let prompt = self.assemble_prompt(graph, task, concept, &outputs, worker, &memory)?;
            let may_delegate = hierarchical && worker.allow_delegation;
            let system = self.system_prompt(worker, may_delegate)?;

            let outcome = worker
                .execute(self.backend.as_ref(), &system, &prompt, may_delegate, &self.llm)
                .await;

            let (draft, acting) = match outcome {
                Ok(WorkerOutcome::Output(text)) => (text, worker),
                Ok(WorkerOutcome::Declined(reason)) => {
                    self.reassign(graph, task, concept, worker, &reason, &outputs, &memory)
                        .await?
                }
                Err(e) if hierarchical => {
                    let reason = e.to_string();
                    self.reassign(graph, task, concept, worker, &reason, &outputs, &memory)
                        .await?
                }
                Err(e) => {
                    self.events.on_task_failed(&task.name, &e.to_string());
                    return Err(Error::TaskExecution {
                        task: task.name.clone(),
                        source: e,
                    });
                }
            };

            // The checkpoint decision gates acceptance; nothing downstream
            // runs until it returns.
            let accepted = if task.human_checkpoint {
                self.events.on_checkpoint(&task.name);
                match self.checkpoint.review(&task.name, &draft).await {
                    Ok(Decision::Approve) => draft,
                    Ok(Decision::Replace(text)) => {
                        info!(task = %task.name, "checkpoint: draft replaced by reviewer");
                        text
                    }
                    Err(e) => {
                        return Err(Error::Checkpoint {
                            task: task.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            } else {
                draft
            };

            if let Some(tool) = &acting.tool {
                let descriptor = tool.invoke(&accepted).await?;
                debug!(task = %task.name, tool = tool.name(), %descriptor, "tool invoked");
            }

            if acting.memory {
                memory.entry(acting.role.clone()).or_default().push(ContextBlock {
                    name: task.name.clone(),
                    output: accepted.clone(),
                });
            }

            self.events.on_task_complete(&task.name, &acting.role, &accepted);
            outputs.insert(idx, accepted.clone());
            record.push((task.name.clone(), accepted));
        }

        let final_output = record.last().map(|(_, output)| output.clone()).unwrap_or_default();

        Ok(RunOutput {
            outputs: record,
            final_output,
        })
    }

    /// Fail fast on unknown or missing worker bindings
    fn check_assignments(&self, graph: &TaskGraph) -> Result<()> {
        let can_auto_assign =
            self.policy == Policy::Hierarchical && self.workers.iter().any(|w| w.allow_delegation);

        for task in graph.tasks() {
            match &task.worker {
                Some(role) => {
                    if self.worker_by_role(role).is_none() {
                        return Err(Error::UnknownWorker {
                            task: task.name.clone(),
                            worker: role.clone(),
                        });
                    }
                }
                None if !can_auto_assign => {
                    return Err(Error::UnassignedTask {
                        task: task.name.clone(),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }

    fn worker_by_role(&self, role: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.role == role)
    }

    /// Resolve the worker for a task
    ///
    /// Unbound tasks under hierarchical policy go to the earliest-declared
    /// delegation-eligible worker.
    fn assign_worker(&self, task: &Task) -> Result<&Worker> {
        match &task.worker {
            Some(role) => self.worker_by_role(role).ok_or_else(|| Error::UnknownWorker {
                task: task.name.clone(),
                worker: role.clone(),
            }),
            None => {
                let worker = self
                    .workers
                    .iter()
                    .find(|w| w.allow_delegation)
                    .ok_or_else(|| Error::UnassignedTask {
                        task: task.name.clone(),
                    })?;
                info!(task = %task.name, worker = %worker.role, "manager assigned unbound task");
                Ok(worker)
            }
        }
    }

    /// Reassign a failed or declined task once
    ///
    /// The replacement worker runs without decline permission, so a task is
    /// handed off at most once per run.
    async fn reassign<'a>(
        &'a self,
        graph: &TaskGraph,
        task: &Task,
        concept: &str,
        original: &Worker,
        reason: &str,
        outputs: &HashMap<usize, String>,
        memory: &HashMap<String, Vec<ContextBlock>>,
    ) -> Result<(String, &'a Worker)> {
        let Some(replacement) = self.delegation.decide(task, reason, &self.workers, &original.role) else {
            self.events.on_task_failed(&task.name, reason);
            return Err(Error::TaskExecution {
                task: task.name.clone(),
                source: GenerationError::InvalidResponse(format!("no eligible worker for reassignment: {reason}")),
            });
        };

        self.events.on_delegation(&task.name, &original.role, &replacement.role, reason);

        let prompt = self.assemble_prompt(graph, task, concept, outputs, replacement, memory)?;
        let system = self.system_prompt(replacement, false)?;

        match replacement
            .execute(self.backend.as_ref(), &system, &prompt, false, &self.llm)
            .await
        {
            Ok(WorkerOutcome::Output(text)) => Ok((text, replacement)),
            Ok(WorkerOutcome::Declined(reason)) => {
                // Cannot happen with delegation disabled; treat as failure
                self.events.on_task_failed(&task.name, &reason);
                Err(Error::TaskExecution {
                    task: task.name.clone(),
                    source: GenerationError::InvalidResponse(reason),
                })
            }
            Err(e) => {
                self.events.on_task_failed(&task.name, &e.to_string());
                Err(Error::TaskExecution {
                    task: task.name.clone(),
                    source: e,
                })
            }
        }
    }

    /// Build the user prompt for a task
    ///
    /// Upstream outputs are included verbatim, delimited by the upstream
    /// task's name, in the task's declared context order.
    fn assemble_prompt(
        &self,
        graph: &TaskGraph,
        task: &Task,
        concept: &str,
        outputs: &HashMap<usize, String>,
        worker: &Worker,
        memory: &HashMap<String, Vec<ContextBlock>>,
    ) -> Result<String> {
        let mut context_blocks = Vec::with_capacity(task.context.len());
        for dep in &task.context {
            let dep_idx = graph.index_of(dep).ok_or_else(|| Error::DanglingReference {
                task: task.name.clone(),
                missing: dep.clone(),
            })?;
            let output = outputs.get(&dep_idx).ok_or_else(|| Error::DanglingReference {
                task: task.name.clone(),
                missing: dep.clone(),
            })?;
            context_blocks.push(ContextBlock {
                name: dep.clone(),
                output: output.clone(),
            });
        }

        let memory_blocks = if worker.memory {
            memory.get(&worker.role).cloned().unwrap_or_default()
        } else {
            Vec::new()
        };

        let context = TaskPromptContext {
            concept: concept.to_string(),
            name: task.name.clone(),
            description: task.description.clone(),
            expected_output: task.expected_output.clone(),
            context_blocks,
            memory_blocks,
        };

        self.loader
            .render(prompts::TASK_PROMPT_TEMPLATE, &context)
            .map_err(|e| Error::Template(e.to_string()))
    }

    fn system_prompt(&self, worker: &Worker, may_delegate: bool) -> Result<String> {
        let context = RoleContext {
            role: worker.role.clone(),
            goal: worker.goal.clone(),
            backstory: worker.backstory.clone(),
            may_delegate,
        };

        self.loader
            .render(prompts::WORKER_SYSTEM_TEMPLATE, &context)
            .map_err(|e| Error::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockBackend;
    use crate::pipeline::events::testing::RecordingSink;
    use std::time::Duration;

    fn worker(role: &str) -> Worker {
        Worker::new(role, format!("{role} goal"), format!("{role} backstory"))
    }

    fn chain_graph() -> TaskGraph {
        TaskGraph::build(vec![
            Task::new("a", "do a", "a out").with_worker("w1"),
            Task::new("b", "do b", "b out").with_worker("w1").with_context(vec!["a"]),
            Task::new("c", "do c", "c out").with_worker("w1").with_context(vec!["b"]),
        ])
        .unwrap()
    }

    fn sequential(backend: MockBackend, workers: Vec<Worker>) -> Coordinator {
        Coordinator::new(workers, Policy::Sequential, Arc::new(backend), LlmConfig::default())
    }

    #[tokio::test]
    async fn test_sequential_chain_runs_in_order() {
        let backend = Arc::new(MockBackend::new(vec!["out-a", "out-b", "out-c"]));
        let coordinator = Coordinator::new(
            vec![worker("w1")],
            Policy::Sequential,
            backend.clone(),
            LlmConfig::default(),
        );

        let result = coordinator.run(&chain_graph(), "concept").await.unwrap();

        assert_eq!(result.get("a"), Some("out-a"));
        assert_eq!(result.get("b"), Some("out-b"));
        assert_eq!(result.get("c"), Some("out-c"));
        assert_eq!(result.final_output(), "out-c");

        let names: Vec<&str> = result.outputs().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        // b's prompt carries a's output verbatim
        let requests = backend.requests();
        assert!(requests[1].prompt.contains("## a"));
        assert!(requests[1].prompt.contains("out-a"));
    }

    #[tokio::test]
    async fn test_prompt_context_in_declared_order() {
        let graph = TaskGraph::build(vec![
            Task::new("a", "do a", "a out").with_worker("w1"),
            Task::new("b", "do b", "b out").with_worker("w1"),
            // Declared context order b before a, opposite of execution order
            Task::new("c", "do c", "c out").with_worker("w1").with_context(vec!["b", "a"]),
        ])
        .unwrap();

        let backend = Arc::new(MockBackend::new(vec!["out-a", "out-b", "out-c"]));
        let coordinator = Coordinator::new(
            vec![worker("w1")],
            Policy::Sequential,
            backend.clone(),
            LlmConfig::default(),
        );

        coordinator.run(&graph, "concept").await.unwrap();

        let prompt = &backend.requests()[2].prompt;
        let b_pos = prompt.find("## b").unwrap();
        let a_pos = prompt.find("## a").unwrap();
        assert!(b_pos < a_pos, "context must follow declared order, not execution order");
    }

    #[tokio::test]
    async fn test_transient_failures_below_limit_succeed() {
        let backend = MockBackend::with_outcomes(vec![
            Err(GenerationError::Timeout(Duration::from_secs(1))),
            Err(GenerationError::Timeout(Duration::from_secs(1))),
            Ok("recovered".to_string()),
        ]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("w1")]).unwrap();
        let coordinator = sequential(backend, vec![worker("w1").with_iteration_limit(3)]);

        let result = coordinator.run(&graph, "concept").await.unwrap();
        assert_eq!(result.final_output(), "recovered");
    }

    #[tokio::test]
    async fn test_failures_at_limit_abort_naming_task() {
        let backend = MockBackend::with_outcomes(vec![
            Err(GenerationError::Timeout(Duration::from_secs(1))),
            Err(GenerationError::Timeout(Duration::from_secs(1))),
        ]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("w1")]).unwrap();
        let coordinator = sequential(backend, vec![worker("w1").with_iteration_limit(2)]);

        let err = coordinator.run(&graph, "concept").await.unwrap_err();
        assert!(matches!(&err, Error::TaskExecution { task, .. } if task == "a"));
    }

    #[tokio::test]
    async fn test_abort_leaves_downstream_unexecuted() {
        let backend = Arc::new(MockBackend::with_outcomes(vec![
            Ok("out-a".to_string()),
            Err(GenerationError::ApiError {
                status: 400,
                message: "bad".to_string(),
            }),
        ]));
        let coordinator = Coordinator::new(
            vec![worker("w1").with_iteration_limit(1)],
            Policy::Sequential,
            backend.clone(),
            LlmConfig::default(),
        );

        let err = coordinator.run(&chain_graph(), "concept").await.unwrap_err();
        assert!(matches!(&err, Error::TaskExecution { task, .. } if task == "b"));
        // c never reached the backend
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_sequential_requires_bound_workers() {
        let backend = MockBackend::new(vec![]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out")]).unwrap();
        let coordinator = sequential(backend, vec![worker("w1")]);

        let err = coordinator.run(&graph, "concept").await.unwrap_err();
        assert!(matches!(&err, Error::UnassignedTask { task } if task == "a"));
    }

    #[tokio::test]
    async fn test_unknown_worker_rejected() {
        let backend = MockBackend::new(vec![]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("ghost")]).unwrap();
        let coordinator = sequential(backend, vec![worker("w1")]);

        let err = coordinator.run(&graph, "concept").await.unwrap_err();
        assert!(matches!(&err, Error::UnknownWorker { worker, .. } if worker == "ghost"));
    }

    #[tokio::test]
    async fn test_hierarchical_decline_reassigns_once() {
        // Call 1: manager ordering proposal. Call 2: w1 declines.
        // Call 3: w2 completes the reassigned task.
        let backend = MockBackend::new(vec!["a", "DELEGATE: not my field", "rescued"]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("w1")]).unwrap();

        let sink = Arc::new(RecordingSink::default());
        let coordinator = Coordinator::new(
            vec![worker("w1").with_delegation(), worker("w2").with_delegation()],
            Policy::Hierarchical,
            Arc::new(backend),
            LlmConfig::default(),
        )
        .with_events(sink.clone());

        let result = coordinator.run(&graph, "concept").await.unwrap();
        assert_eq!(result.final_output(), "rescued");

        let events = sink.recorded();
        assert_eq!(
            events.iter().filter(|e| e.starts_with("delegate:")).count(),
            1,
            "exactly one reassignment"
        );
        assert!(events.contains(&"delegate:a:w1->w2".to_string()));
    }

    #[tokio::test]
    async fn test_hierarchical_reassignment_failure_aborts() {
        // Call 1: manager ordering. Call 2: w1 fails permanently.
        // Call 3: w2 also fails permanently.
        let backend = MockBackend::with_outcomes(vec![
            Ok("a".to_string()),
            Err(GenerationError::ApiError {
                status: 400,
                message: "bad".to_string(),
            }),
            Err(GenerationError::ApiError {
                status: 400,
                message: "still bad".to_string(),
            }),
        ]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("w1")]).unwrap();

        let coordinator = Coordinator::new(
            vec![
                worker("w1").with_iteration_limit(1),
                worker("w2").with_delegation().with_iteration_limit(1),
            ],
            Policy::Hierarchical,
            Arc::new(backend),
            LlmConfig::default(),
        );

        let err = coordinator.run(&graph, "concept").await.unwrap_err();
        assert!(matches!(&err, Error::TaskExecution { task, .. } if task == "a"));
    }

    #[tokio::test]
    async fn test_hierarchical_no_eligible_delegate_aborts() {
        let backend = MockBackend::with_outcomes(vec![
            Ok("a".to_string()),
            Err(GenerationError::ApiError {
                status: 400,
                message: "bad".to_string(),
            }),
        ]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out").with_worker("w1")]).unwrap();

        // Nobody else is delegation-eligible
        let coordinator = Coordinator::new(
            vec![worker("w1").with_iteration_limit(1), worker("w2")],
            Policy::Hierarchical,
            Arc::new(backend),
            LlmConfig::default(),
        );

        let err = coordinator.run(&graph, "concept").await.unwrap_err();
        assert!(matches!(&err, Error::TaskExecution { task, .. } if task == "a"));
    }

    #[tokio::test]
    async fn test_hierarchical_assigns_unbound_tasks() {
        // Manager ordering call, then the task itself
        let backend = MockBackend::new(vec!["a", "done"]);
        let graph = TaskGraph::build(vec![Task::new("a", "do a", "a out")]).unwrap();

        let coordinator = Coordinator::new(
            vec![worker("w1"), worker("w2").with_delegation()],
            Policy::Hierarchical,
            Arc::new(backend),
            LlmConfig::default(),
        );

        let result = coordinator.run(&graph, "concept").await.unwrap();
        assert_eq!(result.final_output(), "done");
    }

    struct ReplacingCheckpoint;

    #[async_trait::async_trait]
    impl CheckpointHandler for ReplacingCheckpoint {
        async fn review(&self, _task_name: &str, _draft: &str) -> eyre::Result<Decision> {
            Ok(Decision::Replace("edited draft".to_string()))
        }
    }

    #[tokio::test]
    async fn test_checkpoint_replacement_feeds_downstream() {
        let backend = Arc::new(MockBackend::new(vec!["raw draft", "final"]));
        let graph = TaskGraph::build(vec![
            Task::new("draft", "write", "a draft").with_worker("w1").with_checkpoint(),
            Task::new("polish", "polish", "final").with_worker("w1").with_context(vec!["draft"]),
        ])
        .unwrap();

        let sink = Arc::new(RecordingSink::default());
        let coordinator = Coordinator::new(
            vec![worker("w1")],
            Policy::Sequential,
            backend.clone(),
            LlmConfig::default(),
        )
        .with_checkpoint(Arc::new(ReplacingCheckpoint))
        .with_events(sink.clone());

        let result = coordinator.run(&graph, "concept").await.unwrap();

        // The stored output is the reviewer's edit, not the raw draft
        assert_eq!(result.get("draft"), Some("edited draft"));
        // Downstream saw the edit
        assert!(backend.requests()[1].prompt.contains("edited draft"));
        assert!(!backend.requests()[1].prompt.contains("raw draft"));

        // Checkpoint fired between start and completion of the draft task
        let events = sink.recorded();
        let checkpoint_pos = events.iter().position(|e| e == "checkpoint:draft").unwrap();
        let complete_pos = events.iter().position(|e| e == "complete:draft").unwrap();
        let downstream_pos = events.iter().position(|e| e == "start:polish:w1").unwrap();
        assert!(checkpoint_pos < complete_pos);
        assert!(complete_pos < downstream_pos);
    }

    #[tokio::test]
    async fn test_memory_worker_sees_own_earlier_output() {
        let backend = Arc::new(MockBackend::new(vec!["first piece", "second piece"]));
        let graph = TaskGraph::build(vec![
            Task::new("a", "do a", "a out").with_worker("w1"),
            Task::new("b", "do b", "b out").with_worker("w1"),
        ])
        .unwrap();

        let coordinator = Coordinator::new(
            vec![worker("w1").with_memory()],
            Policy::Sequential,
            backend.clone(),
            LlmConfig::default(),
        );

        coordinator.run(&graph, "concept").await.unwrap();

        let second_prompt = &backend.requests()[1].prompt;
        assert!(second_prompt.contains("Your earlier work"));
        assert!(second_prompt.contains("first piece"));
    }

    #[tokio::test]
    async fn test_empty_graph_completes() {
        let backend = MockBackend::new(vec![]);
        let graph = TaskGraph::build(vec![]).unwrap();
        let coordinator = sequential(backend, vec![]);

        let result = coordinator.run(&graph, "concept").await.unwrap();
        assert!(result.outputs().is_empty());
        assert_eq!(result.final_output(), "");
    }
}
