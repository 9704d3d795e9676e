//! World State
//!
//! The single mutable aggregate of the simulation: a round counter and the
//! fixed-length roster of agents.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub round: u64,
    pub agents: Vec<Agent>,
}

impl WorldState {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { round: 0, agents }
    }

    /// Iterate over alive agents in roster order
    pub fn alive_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.alive)
    }

    /// Roster indices of alive agents, in roster order
    pub fn alive_indices(&self) -> Vec<usize> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_agents().count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.agents.iter().any(|a| a.alive)
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Finds a valid transfer receiver: alive, named `name`, and not `exclude_id`.
    pub fn transfer_target(&self, name: &str, exclude_id: &str) -> Option<usize> {
        self.agents
            .iter()
            .position(|a| a.name == name && a.alive && a.id != exclude_id)
    }

    /// Sum of all balances, dead slots included
    pub fn total_energy(&self) -> u64 {
        self.agents.iter().map(|a| a.energy).sum()
    }

    /// Serializes the world as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
