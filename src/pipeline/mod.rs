//! Orchestration core: tasks, graphs, workers, and the coordinator

pub mod coordinator;
pub mod delegation;
pub mod events;
pub mod graph;
pub mod ordering;
pub mod task;
pub mod worker;

pub use coordinator::{Coordinator, Policy, RunOutput};
pub use delegation::DelegationManager;
pub use events::{EventSink, LogSink, NullSink};
pub use graph::TaskGraph;
pub use ordering::{FixedTopological, ManagerDirected, OrderingStrategy};
pub use task::Task;
pub use worker::{GenerationOptions, Worker, WorkerOutcome};
