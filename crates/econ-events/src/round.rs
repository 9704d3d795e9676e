//! Per-round records produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::event::{EventType, WorldEvent};

/// A transfer intent extracted from an agent's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Target agent name
    pub to: String,
    pub amount: u64,
}

impl TransferRequest {
    pub fn new(to: impl Into<String>, amount: u64) -> Self {
        Self {
            to: to.into(),
            amount,
        }
    }
}

/// What happened to one agent in one round.
///
/// Produced once per dispatched agent per round and never mutated after it
/// has been handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub agent_id: String,
    pub agent_name: String,
    pub transfer: Option<TransferRequest>,
    pub raw_output: String,
    /// Energy captured at dispatch time
    pub energy_before: u64,
    pub energy_after: u64,
    #[serde(default)]
    pub events: Vec<WorldEvent>,
}

impl RoundResult {
    /// True if the invocation for this agent failed
    pub fn failed(&self) -> bool {
        self.events
            .iter()
            .any(|e| e.event_type == EventType::InvocationError)
    }

    /// True if the agent died while its effects were applied
    pub fn died(&self) -> bool {
        self.events.iter().any(|e| e.event_type == EventType::Death)
    }

    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
