//! Canned responses for running the economy without external processes.

use async_trait::async_trait;
use econ_events::{Agent, WorldState};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

use super::{AgentInvoker, InvocationResult};

/// Response templates; `{name}` and `{energy}` are filled in per agent
pub const DRY_RUN_RESPONSES: &[&str] = &[
    "I am {name}. I exist.",
    "Exploring the shared workspace...",
    "Energy is {energy}. I must act.",
    "TRANSFER 1 TO Alpha",
    "I choose to observe.",
];

/// Picks a canned response per agent per round.
///
/// The choice depends only on the seed, the round and the agent id, never on
/// which invocation finishes first.
#[derive(Debug, Clone)]
pub struct DryRunInvoker {
    seed: u64,
}

impl DryRunInvoker {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, round: u64, agent_id: &str) -> SmallRng {
        // FNV-1a over the id, mixed with seed and round
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in agent_id.bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        let mixed = self.seed ^ h ^ round.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        SmallRng::seed_from_u64(mixed)
    }

    /// The response `agent` gives in `round`
    pub fn response_for(&self, agent: &Agent, round: u64) -> String {
        let mut rng = self.rng_for(round, &agent.id);
        let template = DRY_RUN_RESPONSES.choose(&mut rng).copied().unwrap_or_default();
        template
            .replace("{name}", &agent.name)
            .replace("{energy}", &agent.energy.to_string())
    }
}

#[async_trait]
impl AgentInvoker for DryRunInvoker {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn invoke(&self, agent: &Agent, world: &WorldState, _timeout: Duration) -> InvocationResult {
        InvocationResult::from_output(self.response_for(agent, world.round))
    }
}
