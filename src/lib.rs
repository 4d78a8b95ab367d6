//! Saga - multi-agent script studio
//!
//! A pipeline orchestrator that develops a one-line concept into a video
//! narration script by coordinating role-specialized LLM workers over a
//! validated task dependency graph.

pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod studio;
pub mod tools;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Coordinator, Policy, RunOutput, Task, TaskGraph, Worker};
