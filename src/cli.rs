//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::Policy;

/// Saga - multi-agent script studio
#[derive(Parser)]
#[command(
    name = "saga",
    about = "Turns a concept into a video narration script through a pipeline of specialist workers",
    version,
    after_help = "Logs are written to: ~/.local/share/saga/logs/saga.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Develop a concept into a finished script
    Run {
        /// The concept to develop (prompted interactively if omitted)
        concept: Option<String>,

        /// Coordination policy
        #[arg(short, long, default_value = "hierarchical")]
        policy: PolicyArg,

        /// Directory for the final script artifact
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Approve human checkpoints automatically
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the pipeline's tasks and dependencies
    Tasks {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Coordination policy argument
#[derive(Clone, Copy, Debug, Default)]
pub enum PolicyArg {
    Sequential,
    #[default]
    Hierarchical,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Sequential => Policy::Sequential,
            PolicyArg::Hierarchical => Policy::Hierarchical,
        }
    }
}

impl std::str::FromStr for PolicyArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "hierarchical" | "hier" => Ok(Self::Hierarchical),
            _ => Err(format!("Unknown policy: {}. Use: sequential or hierarchical", s)),
        }
    }
}

impl std::fmt::Display for PolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// Output format for listing commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
