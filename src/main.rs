//! Saga - multi-agent script studio
//!
//! CLI entry point for developing concepts into video narration scripts.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use saga::checkpoint::{AutoApprove, CheckpointHandler, TerminalCheckpoint};
use saga::cli::{Cli, Command, OutputFormat};
use saga::config::Config;
use saga::llm::create_backend;
use saga::pipeline::Coordinator;
use saga::prompts::PromptLoader;
use saga::studio;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saga")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("saga.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Saga loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Run {
            concept,
            policy,
            output,
            yes,
        }) => cmd_run(config, concept, policy.into(), output, yes).await,
        Some(Command::Tasks { format }) => cmd_tasks(&config, format),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Run the full studio pipeline over a concept
async fn cmd_run(
    mut config: Config,
    concept: Option<String>,
    policy: saga::Policy,
    output: Option<PathBuf>,
    yes: bool,
) -> Result<()> {
    config.validate()?;

    if let Some(dir) = output {
        config.studio.output_dir = dir;
    }

    println!("{}", "# Welcome to the Saga AI offices".bold().cyan());
    println!("{}", "-------------------------------".cyan());

    let concept = match concept {
        Some(c) => c,
        None => prompt_for_concept().await?,
    };
    if concept.trim().is_empty() {
        eyre::bail!("No concept provided");
    }

    let backend = create_backend(&config.llm)?;
    let loader = PromptLoader::new(".");
    let graph = studio::pipeline(&config, &loader)?;
    let workers = studio::roster(&config);

    let checkpoint: Arc<dyn CheckpointHandler> = if yes {
        Arc::new(AutoApprove)
    } else {
        Arc::new(TerminalCheckpoint)
    };

    let coordinator = Coordinator::new(workers, policy, backend, config.llm.clone())
        .with_loader(loader)
        .with_checkpoint(checkpoint);

    println!("\n{} {}\n", "Developing:".bold(), concept.trim());

    let result = match coordinator.run(&graph, concept.trim()).await {
        Ok(result) => result,
        Err(e) => {
            if let Some(task) = e.task_name() {
                eprintln!("{} {task}", "Pipeline failed at:".bold().red());
            }
            return Err(e.into());
        }
    };

    println!("{}", "=== Final script ===".bold().green());
    println!("{}", result.final_output());
    println!(
        "\n{} {}",
        "Script saved under:".dimmed(),
        config.studio.output_dir.display()
    );

    Ok(())
}

/// Read the concept interactively
async fn prompt_for_concept() -> Result<String> {
    tokio::task::spawn_blocking(|| {
        let mut editor = rustyline::DefaultEditor::new()?;
        let line = editor.readline(
            "What is the concept you would like to develop today? Give us a brief overview of your idea: ",
        )?;
        Ok(line)
    })
    .await
    .context("Concept prompt task failed")?
}

/// Print the pipeline's tasks and their wiring
fn cmd_tasks(config: &Config, format: OutputFormat) -> Result<()> {
    let loader = PromptLoader::embedded_only();
    let graph = studio::pipeline(config, &loader)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(graph.tasks())?);
        }
        OutputFormat::Text => {
            for task in graph.tasks() {
                let worker = task.worker.as_deref().unwrap_or("(unassigned)");
                let checkpoint = if task.human_checkpoint { " [checkpoint]" } else { "" };
                println!("{}  {}{}", task.name.bold(), worker.dimmed(), checkpoint);
                if !task.context.is_empty() {
                    println!("    depends on: {}", task.context.join(", "));
                }
            }
        }
    }

    Ok(())
}
