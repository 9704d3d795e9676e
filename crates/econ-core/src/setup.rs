//! World Setup
//!
//! Builds the initial roster and the directories agents work in.

use econ_events::{Agent, Invoker, WorldState};
use std::fs;

use crate::config::SimulationConfig;
use crate::memory::NoteStore;

/// Names for the first eight slots; later slots are `Agent-<i>`
pub const AGENT_NAMES: &[&str] = &["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta"];

pub fn agent_name(index: usize) -> String {
    AGENT_NAMES
        .get(index)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("Agent-{}", index))
}

/// Invoker for slot `index` of `count`: the configured one, otherwise the
/// first half claude and the second half codex
pub fn invoker_for(config: &SimulationConfig, index: usize, count: usize) -> Invoker {
    match config.invoker {
        Some(invoker) => invoker,
        None if index < count / 2 => Invoker::Claude,
        None => Invoker::Codex,
    }
}

/// Round-0 world with `initial_agent_count` fresh agents
pub fn initial_world(config: &SimulationConfig) -> WorldState {
    let count = config.initial_agent_count;
    let agents = (0..count)
        .map(|i| {
            Agent::new(
                format!("agent-{}", i),
                agent_name(i),
                config.initial_energy,
                invoker_for(config, i, count),
            )
        })
        .collect();
    WorldState::new(agents)
}

/// Build the initial world and create the shared and private directories
pub fn create_world(config: &SimulationConfig) -> crate::Result<WorldState> {
    let world = initial_world(config);
    fs::create_dir_all(&config.shared_dir)?;
    NoteStore::new(&config.agents_dir).ensure_dirs(&world.agents)?;

    tracing::info!(
        agents = world.agents.len(),
        energy = config.initial_energy,
        claude = world.agents.iter().filter(|a| a.invoker == Invoker::Claude).count(),
        codex = world.agents.iter().filter(|a| a.invoker == Invoker::Codex).count(),
        "Created world"
    );
    Ok(world)
}
