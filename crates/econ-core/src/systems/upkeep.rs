//! Upkeep System
//!
//! Every agent pays a fixed living cost each round, whether or not its
//! invocation succeeded.

use econ_events::{Agent, WorldEvent};

/// Energy consumed per agent per round
pub const UPKEEP_COST: u64 = 1;

/// Charge one round of upkeep and age the agent by one round.
///
/// The balance saturates at zero. Reaching zero kills the agent and emits a
/// single `death` event; an agent that was already dead emits nothing.
pub fn apply_upkeep(agent: &mut Agent, round: u64) -> Vec<WorldEvent> {
    agent.energy = agent.energy.saturating_sub(UPKEEP_COST);
    agent.age += 1;

    if agent.energy == 0 && agent.alive {
        agent.alive = false;
        tracing::debug!(agent = %agent.name, age = agent.age, "Energy depleted by upkeep");
        return vec![WorldEvent::death(round, agent.id.clone(), agent.age)];
    }

    Vec::new()
}
