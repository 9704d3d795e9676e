//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other
//! crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // econ-events = { path = "../econ-events", features = ["test-fixtures"] }
//!
//! use econ_events::fixtures;
//!
//! let world = fixtures::alpha_beta();
//! ```

use crate::{Agent, Invoker, WorldState};

/// Alpha (energy 10) and Beta (energy 5), both alive, round 0.
pub fn alpha_beta() -> WorldState {
    WorldState::new(vec![
        Agent::new("agent-0", "Alpha", 10, Invoker::Claude),
        Agent::new("agent-1", "Beta", 5, Invoker::Codex),
    ])
}

/// A world of `count` alive agents with `energy` each, invokers alternating.
pub fn uniform(count: usize, energy: u64) -> WorldState {
    let agents = (0..count)
        .map(|i| {
            let invoker = if i % 2 == 0 {
                Invoker::Claude
            } else {
                Invoker::Codex
            };
            Agent::new(format!("agent-{}", i), format!("Agent{}", i), energy, invoker)
        })
        .collect();
    WorldState::new(agents)
}

/// A mid-run world snapshot loaded from the fixtures file.
///
/// Round 17, five agents, one of them dead.
pub fn sample_world() -> WorldState {
    let json = include_str!("../tests/fixtures/sample_world.json");
    WorldState::from_json(json).expect("Failed to parse sample_world.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_world_loads() {
        let world = sample_world();
        assert_eq!(world.round, 17);
        assert_eq!(world.agents.len(), 5);
        assert_eq!(world.alive_count(), 4);
    }

    #[test]
    fn test_uniform() {
        let world = uniform(4, 7);
        assert_eq!(world.total_energy(), 28);
        assert_eq!(world.agents[1].invoker, Invoker::Codex);
    }
}
