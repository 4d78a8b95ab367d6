//! Worker tool collaborators
//!
//! A tool runs as a side effect after its worker's output is accepted. Tools
//! must be idempotent: worker retries can invoke them more than once for the
//! same output.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Errors raised by tool invocations
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),
}

/// A side-effecting capability attached to a worker
#[async_trait]
pub trait Tool: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Run the tool against an accepted output, returning a descriptor of
    /// what was done (for example, the path of a written file)
    async fn invoke(&self, output: &str) -> Result<String, ToolError>;
}

/// Writes the final script to disk as markdown
///
/// The filename includes a hash of the content, so invoking the tool twice
/// with the same output rewrites the same file rather than creating a new
/// one.
pub struct SaveScriptTool {
    output_dir: PathBuf,
}

impl SaveScriptTool {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn artifact_path(&self, output: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        output.hash(&mut hasher);
        let date = chrono::Utc::now().format("%Y%m%d");
        self.output_dir.join(format!("script-{date}-{:016x}.md", hasher.finish()))
    }
}

#[async_trait]
impl Tool for SaveScriptTool {
    fn name(&self) -> &str {
        "save-script"
    }

    async fn invoke(&self, output: &str) -> Result<String, ToolError> {
        if output.trim().is_empty() {
            return Err(ToolError::Failed("refusing to write an empty script".to_string()));
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self.artifact_path(output);
        tokio::fs::write(&path, output).await?;

        info!(path = %path.display(), "save-script: wrote artifact");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_script_writes_file() {
        let dir = TempDir::new().unwrap();
        let tool = SaveScriptTool::new(dir.path());

        let path = tool.invoke("# The Script\n\nFade in.").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# The Script\n\nFade in.");
        assert!(path.ends_with(".md"));
    }

    #[tokio::test]
    async fn test_save_script_idempotent() {
        let dir = TempDir::new().unwrap();
        let tool = SaveScriptTool::new(dir.path());

        let first = tool.invoke("same content").await.unwrap();
        let second = tool.invoke("same content").await.unwrap();

        // Same content, same artifact
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_save_script_distinct_content() {
        let dir = TempDir::new().unwrap();
        let tool = SaveScriptTool::new(dir.path());

        let first = tool.invoke("content a").await.unwrap();
        let second = tool.invoke("content b").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_save_script_rejects_empty_output() {
        let dir = TempDir::new().unwrap();
        let tool = SaveScriptTool::new(dir.path());

        let err = tool.invoke("   \n").await.unwrap_err();
        assert!(matches!(err, ToolError::Failed(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_save_script_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep/scripts");
        let tool = SaveScriptTool::new(&nested);

        tool.invoke("content").await.unwrap();
        assert!(nested.is_dir());
    }
}
