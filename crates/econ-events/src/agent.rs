//! Agent Types
//!
//! A single slot in the fixed roster. Slots are never added or removed; a
//! dead slot is reused on respawn with the same `id` and `name`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which external decision process drives an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invoker {
    Claude,
    Codex,
}

impl Invoker {
    /// Short lowercase name, as used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Invoker::Claude => "claude",
            Invoker::Codex => "codex",
        }
    }
}

impl fmt::Display for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity in the economy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier, assigned once at world creation
    pub id: String,
    /// Display name, also the target of transfer intents
    pub name: String,
    /// Energy balance; zero means the agent is dead or about to be
    pub energy: u64,
    pub alive: bool,
    /// Rounds survived since the last (re)birth
    pub age: u64,
    pub invoker: Invoker,
}

impl Agent {
    /// Create a fresh, alive agent with age zero
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        energy: u64,
        invoker: Invoker,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            energy,
            alive: true,
            age: 0,
            invoker,
        }
    }

    /// Lowercased name, used for the agent's private directory
    pub fn dir_name(&self) -> String {
        self.name.to_lowercase()
    }
}
