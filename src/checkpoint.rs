//! Human checkpoint handling
//!
//! Tasks flagged with a checkpoint pause the run after a draft is produced
//! and before it is accepted. No downstream task starts until the handler
//! returns a decision.

use async_trait::async_trait;
use colored::Colorize;
use eyre::{Result, eyre};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// The reviewer's verdict on a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Store the draft verbatim
    Approve,
    /// Store the replacement text instead
    Replace(String),
}

/// Reviews a draft at a human checkpoint
#[async_trait]
pub trait CheckpointHandler: Send + Sync {
    async fn review(&self, task_name: &str, draft: &str) -> Result<Decision>;
}

/// Handler that approves every draft without interaction
pub struct AutoApprove;

#[async_trait]
impl CheckpointHandler for AutoApprove {
    async fn review(&self, _task_name: &str, _draft: &str) -> Result<Decision> {
        Ok(Decision::Approve)
    }
}

/// Interactive handler reading the decision from the terminal
///
/// Shows the draft, then reads lines until a lone `.` (or EOF). An empty
/// buffer approves the draft; anything typed becomes the replacement.
pub struct TerminalCheckpoint;

#[async_trait]
impl CheckpointHandler for TerminalCheckpoint {
    async fn review(&self, task_name: &str, draft: &str) -> Result<Decision> {
        let task_name = task_name.to_string();
        let draft = draft.to_string();

        // Readline blocks; keep it off the async runtime
        tokio::task::spawn_blocking(move || review_blocking(&task_name, &draft))
            .await
            .map_err(|e| eyre!("checkpoint task panicked: {e}"))?
    }
}

fn review_blocking(task_name: &str, draft: &str) -> Result<Decision> {
    println!();
    println!("{}", format!("=== Checkpoint: {task_name} ===").bold().cyan());
    println!("{draft}");
    println!();
    println!(
        "{}",
        "Press Enter on an empty line to approve, or type a replacement and finish with a single '.' line.".dimmed()
    );

    let mut editor = DefaultEditor::new()?;
    let mut replacement = String::new();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line == "." {
                    break;
                }
                if line.is_empty() && replacement.is_empty() {
                    return Ok(Decision::Approve);
                }
                replacement.push_str(&line);
                replacement.push('\n');
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => return Err(eyre!("checkpoint interrupted")),
            Err(e) => return Err(e.into()),
        }
    }

    if replacement.trim().is_empty() {
        Ok(Decision::Approve)
    } else {
        Ok(Decision::Replace(replacement.trim_end().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_approve() {
        let decision = AutoApprove.review("draft", "some text").await.unwrap();
        assert_eq!(decision, Decision::Approve);
    }
}
