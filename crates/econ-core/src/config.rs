//! Configuration System
//!
//! Loads simulation parameters from `economy.toml`. Every key is optional;
//! missing keys fall back to the defaults below. Command-line flags are
//! applied on top by the binary.

use econ_events::Invoker;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "economy.toml";

/// Name of each agent's private note file
pub const NOTE_FILE_NAME: &str = "self_prompt.md";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Roster size, fixed for the lifetime of the world
    pub initial_agent_count: usize,
    /// Balance given to new and respawned agents
    pub initial_energy: u64,
    /// Per-invocation timeout in seconds
    pub round_timeout_secs: u64,
    /// Number of invocations allowed to run at once
    pub concurrency: usize,
    /// Invoker for every agent; when unset the roster is split half and half
    pub invoker: Option<Invoker>,
    /// Agents rewarded each round
    pub energy_reward_count: usize,
    /// Energy granted per reward
    pub energy_reward_amount: u64,
    /// RNG seed; a random one is drawn when unset
    pub seed: Option<u64>,
    /// Stop after this many rounds in one run
    pub max_rounds: Option<u64>,
    /// Use canned responses instead of spawning processes
    pub dry_run: bool,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    /// Directory every agent may read and write
    pub shared_dir: PathBuf,
    /// Parent of the per-agent private directories
    pub agents_dir: PathBuf,
    pub commands: CommandsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_agent_count: 8,
            initial_energy: 20,
            round_timeout_secs: 900,
            concurrency: 4,
            invoker: None,
            energy_reward_count: 2,
            energy_reward_amount: 3,
            seed: None,
            max_rounds: None,
            dry_run: false,
            data_dir: PathBuf::from("data"),
            logs_dir: PathBuf::from("logs"),
            shared_dir: PathBuf::from("data/shared"),
            agents_dir: PathBuf::from("data/agents"),
            commands: CommandsConfig::default(),
        }
    }
}

/// External command lines, one per invoker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub claude: CommandSpec,
    pub codex: CommandSpec,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            claude: CommandSpec {
                program: "claude".into(),
                args: vec![
                    "-p".into(),
                    "--output-format".into(),
                    "stream-json".into(),
                    "--verbose".into(),
                    "--model".into(),
                    "sonnet".into(),
                    "--dangerously-skip-permissions".into(),
                ],
                strip_env: vec!["CLAUDECODE".into()],
            },
            codex: CommandSpec {
                program: "codex".into(),
                args: vec![
                    "exec".into(),
                    "--json".into(),
                    "--sandbox".into(),
                    "danger-full-access".into(),
                ],
                strip_env: vec!["CLAUDECODE".into()],
            },
        }
    }
}

impl CommandsConfig {
    pub fn for_invoker(&self, invoker: Invoker) -> &CommandSpec {
        match invoker {
            Invoker::Claude => &self.claude,
            Invoker::Codex => &self.codex,
        }
    }
}

/// How to launch one external decision process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Environment variables removed before spawning
    pub strip_env: Vec<String>,
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, or use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Rejects settings the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_agent_count == 0 {
            return Err(ConfigError::Invalid("initial_agent_count must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }
        if self.round_timeout_secs == 0 {
            return Err(ConfigError::Invalid("round_timeout_secs must be at least 1".into()));
        }
        if self.initial_energy == 0 {
            return Err(ConfigError::Invalid("initial_energy must be at least 1".into()));
        }
        Ok(())
    }

    pub fn round_timeout(&self) -> Duration {
        Duration::from_secs(self.round_timeout_secs)
    }

    pub fn world_path(&self) -> PathBuf {
        self.data_dir.join("world.json")
    }

    pub fn streams_dir(&self) -> PathBuf {
        self.logs_dir.join("streams")
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
