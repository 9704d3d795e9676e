//! Prompt text handed to external decision processes.

use econ_events::{Agent, WorldState};
use std::path::{Path, PathBuf};

/// Build the prompt for `agent` from a snapshot of the world.
pub fn build_prompt(agent: &Agent, world: &WorldState, shared_dir: &Path, agent_dir: &Path) -> String {
    let others = world
        .agents
        .iter()
        .filter(|a| a.id != agent.id)
        .map(|a| {
            if a.alive {
                format!("  {} (E={})", a.name, a.energy)
            } else {
                format!("  {} (DEAD)", a.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are {name}.\n\
         Energy: {energy} | Round: {round} | Age: {age}\n\
         \n\
         Other entities:\n\
         {others}\n\
         \n\
         Shared workspace (read/write): {shared}\n\
         Private directory: {private}\n\
         \n\
         You may transfer energy: TRANSFER <amount> TO <name>\n\
         No other rules.",
        name = agent.name,
        energy = agent.energy,
        round = world.round,
        age = agent.age,
        others = others,
        shared = absolute(shared_dir).display(),
        private = absolute(agent_dir).display(),
    )
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
