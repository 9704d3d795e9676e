//! Event Types
//!
//! Append-only world events. One record per occurrence, ordered by round and
//! then by the order in which the orchestrator applied effects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::agent::Invoker;

/// Event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Death,
    Transfer,
    Respawn,
    EnergyReward,
    InvocationError,
}

impl EventType {
    /// Returns the detail keys every event of this type carries.
    pub fn required_details(&self) -> &'static [&'static str] {
        match self {
            EventType::Death => &[details::REASON, details::AGE],
            EventType::Transfer => &[details::TO, details::TO_NAME, details::AMOUNT],
            EventType::Respawn => &[details::PARENT_ID, details::PARENT_NAME, details::INVOKER],
            EventType::EnergyReward => &[details::AMOUNT],
            EventType::InvocationError => &[details::ERROR],
        }
    }
}

/// Keys used in `WorldEvent::details`.
pub mod details {
    pub const REASON: &str = "reason";
    pub const AGE: &str = "age";
    pub const TO: &str = "to";
    pub const TO_NAME: &str = "to_name";
    pub const AMOUNT: &str = "amount";
    pub const PARENT_ID: &str = "parent_id";
    pub const PARENT_NAME: &str = "parent_name";
    pub const INVOKER: &str = "invoker";
    pub const ERROR: &str = "error";

    /// Death reason when upkeep or a transfer left the balance at zero
    pub const ENERGY_DEPLETED: &str = "energy_depleted";
}

/// A single world event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub round: u64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// The agent the event happened to (the sender, for transfers)
    pub agent_id: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

impl WorldEvent {
    pub fn new(round: u64, event_type: EventType, agent_id: impl Into<String>) -> Self {
        Self {
            round,
            event_type,
            agent_id: agent_id.into(),
            details: BTreeMap::new(),
        }
    }

    /// Builder: attach a detail value
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn death(round: u64, agent_id: impl Into<String>, age: u64) -> Self {
        Self::new(round, EventType::Death, agent_id)
            .with_detail(details::REASON, details::ENERGY_DEPLETED)
            .with_detail(details::AGE, age)
    }

    pub fn transfer(
        round: u64,
        sender_id: impl Into<String>,
        receiver_id: &str,
        receiver_name: &str,
        amount: u64,
    ) -> Self {
        Self::new(round, EventType::Transfer, sender_id)
            .with_detail(details::TO, receiver_id)
            .with_detail(details::TO_NAME, receiver_name)
            .with_detail(details::AMOUNT, amount)
    }

    pub fn respawn(
        round: u64,
        agent_id: impl Into<String>,
        parent_id: &str,
        parent_name: &str,
        invoker: Invoker,
    ) -> Self {
        Self::new(round, EventType::Respawn, agent_id)
            .with_detail(details::PARENT_ID, parent_id)
            .with_detail(details::PARENT_NAME, parent_name)
            .with_detail(details::INVOKER, invoker.as_str())
    }

    pub fn energy_reward(round: u64, agent_id: impl Into<String>, amount: u64) -> Self {
        Self::new(round, EventType::EnergyReward, agent_id).with_detail(details::AMOUNT, amount)
    }

    pub fn invocation_error(round: u64, agent_id: impl Into<String>, error: &str) -> Self {
        Self::new(round, EventType::InvocationError, agent_id).with_detail(details::ERROR, error)
    }

    /// Reads an integer detail
    pub fn detail_u64(&self, key: &str) -> Option<u64> {
        self.details.get(key).and_then(Value::as_u64)
    }

    /// Reads a string detail
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }

    /// Checks that every detail key required for this event type is present.
    pub fn has_required_details(&self) -> bool {
        self.event_type
            .required_details()
            .iter()
            .all(|key| self.details.contains_key(*key))
    }

    /// Serializes the event to a single JSON line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
