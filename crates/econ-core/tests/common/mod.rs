//! Shared helpers for the engine integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use econ_core::config::NOTE_FILE_NAME;
use econ_core::{AgentInvoker, InvocationResult, SimulationConfig};
use econ_events::{Agent, WorldState};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// What an invocation does to a note file
#[derive(Debug, Clone)]
pub enum NoteAction {
    Write(Vec<u8>),
    Remove,
    /// Put a directory where the note file should be
    MakeDir,
}

/// A note write performed during an invocation
#[derive(Debug, Clone)]
pub struct NoteWrite {
    /// Directory name of the agent whose note is written
    pub target: String,
    pub action: NoteAction,
    /// Wait this long before writing
    pub delay: Duration,
}

/// Invoker driven by a per-name script
#[derive(Debug, Default)]
pub struct ScriptedInvoker {
    agents_dir: PathBuf,
    responses: HashMap<String, String>,
    failures: HashSet<String>,
    writes: HashMap<String, Vec<NoteWrite>>,
    calls: Mutex<Vec<(u64, String)>>,
}

impl ScriptedInvoker {
    pub fn new(agents_dir: impl Into<PathBuf>) -> Self {
        Self {
            agents_dir: agents_dir.into(),
            ..Self::default()
        }
    }

    pub fn respond(mut self, name: &str, text: &str) -> Self {
        self.responses.insert(name.to_string(), text.to_string());
        self
    }

    pub fn fail(mut self, name: &str) -> Self {
        self.failures.insert(name.to_string());
        self
    }

    /// While `writer` runs, write `content` into `target`'s note after `delay_ms`
    pub fn write_note(self, writer: &str, target: &str, content: Option<&str>, delay_ms: u64) -> Self {
        let action = match content {
            Some(content) => NoteAction::Write(content.as_bytes().to_vec()),
            None => NoteAction::Remove,
        };
        self.note_action(writer, target, action, delay_ms)
    }

    /// While `writer` runs, apply `action` to `target`'s note after `delay_ms`
    pub fn note_action(mut self, writer: &str, target: &str, action: NoteAction, delay_ms: u64) -> Self {
        self.writes.entry(writer.to_string()).or_default().push(NoteWrite {
            target: target.to_lowercase(),
            action,
            delay: Duration::from_millis(delay_ms),
        });
        self
    }

    /// `(round, name)` for every invocation, in call order
    pub fn calls(&self) -> Vec<(u64, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentInvoker for ScriptedInvoker {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, agent: &Agent, world: &WorldState, _timeout: Duration) -> InvocationResult {
        self.calls.lock().unwrap().push((world.round, agent.name.clone()));

        for write in self.writes.get(&agent.name).into_iter().flatten() {
            tokio::time::sleep(write.delay).await;
            let dir = self.agents_dir.join(&write.target);
            let path = dir.join(NOTE_FILE_NAME);
            match &write.action {
                NoteAction::Write(content) => {
                    std::fs::create_dir_all(&dir).unwrap();
                    std::fs::write(&path, content).unwrap();
                }
                NoteAction::Remove => {
                    let _ = std::fs::remove_file(&path);
                }
                NoteAction::MakeDir => {
                    let _ = std::fs::remove_file(&path);
                    std::fs::create_dir_all(path.join("junk")).unwrap();
                }
            }
        }

        if self.failures.contains(&agent.name) {
            return InvocationResult::failed("scripted failure");
        }
        let text = self
            .responses
            .get(&agent.name)
            .cloned()
            .unwrap_or_else(|| "I choose to observe.".to_string());
        InvocationResult::from_output(text)
    }
}

/// Config rooted in `dir` with rewards switched off
pub fn test_config(dir: &Path) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.data_dir = dir.join("data");
    config.logs_dir = dir.join("logs");
    config.shared_dir = dir.join("data/shared");
    config.agents_dir = dir.join("data/agents");
    config.energy_reward_count = 0;
    config.round_timeout_secs = 5;
    config
}

pub fn note_path(config: &SimulationConfig, name: &str) -> PathBuf {
    config.agents_dir.join(name.to_lowercase()).join(NOTE_FILE_NAME)
}

pub fn read_note(config: &SimulationConfig, name: &str) -> Option<String> {
    std::fs::read_to_string(note_path(config, name)).ok()
}

pub fn read_note_bytes(config: &SimulationConfig, name: &str) -> Option<Vec<u8>> {
    std::fs::read(note_path(config, name)).ok()
}

pub fn write_note(config: &SimulationConfig, name: &str, content: &str) {
    let path = note_path(config, name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
