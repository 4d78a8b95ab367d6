//! Saga configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Saga configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Script studio defaults
    pub studio: StudioConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables are set. Call this early in
    /// startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .saga.yml
        let local_config = PathBuf::from(".saga.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/saga/saga.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("saga").join("saga.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "anthropic" supported)
    pub provider: String,

    /// Model identifier for worker generation
    pub model: String,

    /// Model identifier for the hierarchical manager (ordering and assignment)
    #[serde(rename = "manager-model")]
    pub manager_model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Sampling temperature for worker generation
    pub temperature: f32,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).context(format!("environment variable {} not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            manager_model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 300_000,
            temperature: 0.7,
        }
    }
}

/// Script studio defaults
///
/// These feed the role and task prompt templates; none of them affect the
/// orchestration core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Target narration length in seconds
    #[serde(rename = "script-duration-secs")]
    pub script_duration_secs: u32,

    /// Writers whose style the script should emulate
    #[serde(rename = "writers-to-emulate")]
    pub writers_to_emulate: String,

    /// Overall tone of the script
    pub tone: String,

    /// Call to action appended to the script
    #[serde(rename = "call-to-action")]
    pub call_to_action: String,

    /// Directory where the final script artifact is written
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Maximum generation attempts per task
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            script_duration_secs: 60,
            writers_to_emulate: "Borges, Lovecraft, Hemingway".to_string(),
            tone: "Mysterious, engaging, suspenseful".to_string(),
            call_to_action: "What if all you've been told is a lie? Follow to find the truth.".to_string(),
            output_dir: PathBuf::from("scripts"),
            max_iterations: 3,
        }
    }
}
