//! Subprocess invoker
//!
//! Spawns the command configured for the agent's invoker, feeds the prompt
//! on stdin and reads the answer back. The raw stdout transcript is kept
//! under `<logs_dir>/streams/` for later inspection.

use async_trait::async_trait;
use econ_events::{Agent, Invoker, WorldState};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{build_prompt, AgentInvoker, InvocationResult};
use crate::config::{CommandSpec, CommandsConfig, SimulationConfig};
use crate::memory::NoteStore;

/// Longest error text kept in `raw_output`
const MAX_ERROR_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invokes agents through external CLI programs
#[derive(Debug, Clone)]
pub struct CliInvoker {
    commands: CommandsConfig,
    shared_dir: PathBuf,
    notes: NoteStore,
    streams_dir: PathBuf,
}

impl CliInvoker {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            commands: config.commands.clone(),
            shared_dir: config.shared_dir.clone(),
            notes: NoteStore::new(&config.agents_dir),
            streams_dir: config.streams_dir(),
        }
    }

    fn stream_path(&self, round: u64, agent: &Agent) -> PathBuf {
        self.streams_dir.join(format!("r{}-{}.jsonl", round, agent.dir_name()))
    }

    async fn run(&self, agent: &Agent, world: &WorldState, timeout: Duration) -> Result<String, InvokeError> {
        let agent_dir = self.notes.dir_for(agent);
        tokio::fs::create_dir_all(&agent_dir).await?;
        let prompt = build_prompt(agent, world, &self.shared_dir, &agent_dir);

        let spec = self.commands.for_invoker(agent.invoker);
        // codex writes its final message to a file rather than stdout
        let output_file = match agent.invoker {
            Invoker::Codex => Some(
                tempfile::Builder::new()
                    .prefix(&format!("econ-output-{}-", agent.id))
                    .suffix(".txt")
                    .tempfile()?,
            ),
            Invoker::Claude => None,
        };

        let mut command = build_command(spec, output_file.as_ref().map(|f| f.path()));
        let stdout = tokio::time::timeout(timeout, run_command(&mut command, spec, &prompt))
            .await
            .map_err(|_| InvokeError::Timeout(timeout))??;

        tokio::fs::create_dir_all(&self.streams_dir).await?;
        tokio::fs::write(self.stream_path(world.round, agent), &stdout).await?;

        match output_file {
            Some(file) => Ok(tokio::fs::read_to_string(file.path()).await?),
            None => Ok(extract_claude_text(&stdout)),
        }
    }
}

fn build_command(spec: &CommandSpec, output_file: Option<&Path>) -> Command {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    if let Some(path) = output_file {
        command.arg("-o").arg(path);
    }
    for var in &spec.strip_env {
        command.env_remove(var);
    }
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

async fn run_command(command: &mut Command, spec: &CommandSpec, prompt: &str) -> Result<String, InvokeError> {
    let mut child = command.spawn().map_err(|source| InvokeError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(prompt.as_bytes()).await?;
        // closing stdin tells the program the prompt is complete
        drop(stdin);
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(InvokeError::Exit {
            program: spec.program.clone(),
            status: output.status,
            stderr: truncate(String::from_utf8_lossy(&output.stderr).trim(), MAX_ERROR_LEN),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Pull the assistant's text out of a `stream-json` transcript.
///
/// Collects text blocks of `assistant` records and the body of `result`
/// records, joined by newlines. Returns the transcript unchanged when it
/// holds no such records.
pub fn extract_claude_text(stream: &str) -> String {
    let mut parts = Vec::new();
    for line in stream.lines().filter(|l| !l.trim().is_empty()) {
        let Ok(record) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        match record.get("type").and_then(|t| t.as_str()) {
            Some("assistant") => {
                let blocks = record
                    .pointer("/message/content")
                    .and_then(|c| c.as_array())
                    .into_iter()
                    .flatten();
                for block in blocks {
                    if block.get("type").and_then(|t| t.as_str()) == Some("text") {
                        if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                            parts.push(text.to_string());
                        }
                    }
                }
            }
            Some("result") => {
                if let Some(text) = record.get("result").and_then(|r| r.as_str()) {
                    if !text.is_empty() {
                        parts.push(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        stream.to_string()
    } else {
        parts.join("\n")
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[async_trait]
impl AgentInvoker for CliInvoker {
    fn name(&self) -> &str {
        "cli"
    }

    async fn invoke(&self, agent: &Agent, world: &WorldState, timeout: Duration) -> InvocationResult {
        match self.run(agent, world, timeout).await {
            Ok(raw) => InvocationResult::from_output(raw),
            Err(e) => {
                tracing::warn!(agent = %agent.name, invoker = %agent.invoker, error = %e, "Invocation failed");
                InvocationResult::failed(truncate(&e.to_string(), MAX_ERROR_LEN))
            }
        }
    }
}
