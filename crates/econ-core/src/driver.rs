//! Simulation Driver
//!
//! Runs rounds until the population dies out or the round cap is reached.

use econ_events::{Agent, WorldState};

use crate::orchestrator::{RoundOrchestrator, RoundReport};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Extinct,
    RoundCapReached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub final_round: u64,
    pub rounds_run: u64,
    pub outcome: Outcome,
    /// Alive agents at the end, in roster order
    pub survivors: Vec<Agent>,
}

/// A world plus the orchestrator that advances it
#[derive(Debug)]
pub struct Simulation {
    world: WorldState,
    orchestrator: RoundOrchestrator,
}

impl Simulation {
    pub fn new(world: WorldState, orchestrator: RoundOrchestrator) -> Self {
        Self { world, orchestrator }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn into_world(self) -> WorldState {
        self.world
    }

    /// Advance exactly one round
    pub async fn step(&mut self) -> crate::Result<RoundReport> {
        self.orchestrator.run_round(&mut self.world).await
    }

    /// Run until extinction, or until `max_rounds` rounds have run in this call.
    /// A cap of 0 means no cap.
    ///
    /// The world is saved once before the first round so that a run that
    /// starts from a fresh world can be resumed even if it stops immediately.
    pub async fn run(&mut self, max_rounds: Option<u64>) -> crate::Result<SimulationSummary> {
        let max_rounds = max_rounds.filter(|&cap| cap > 0);
        self.orchestrator.persistence().save_world(&self.world)?;

        let mut rounds_run = 0;
        while !self.world.is_extinct() {
            if max_rounds.is_some_and(|cap| rounds_run >= cap) {
                break;
            }
            self.step().await?;
            rounds_run += 1;
        }

        let outcome = if self.world.is_extinct() {
            Outcome::Extinct
        } else {
            Outcome::RoundCapReached
        };
        let summary = SimulationSummary {
            final_round: self.world.round,
            rounds_run,
            outcome,
            survivors: self.world.alive_agents().cloned().collect(),
        };

        match outcome {
            Outcome::Extinct => {
                tracing::info!(round = summary.final_round, rounds_run, "All agents are dead. Simulation over.")
            }
            Outcome::RoundCapReached => tracing::info!(
                round = summary.final_round,
                rounds_run,
                survivors = summary.survivors.len(),
                "Round cap reached"
            ),
        }
        for agent in &summary.survivors {
            tracing::info!(
                agent = %agent.name,
                energy = agent.energy,
                age = agent.age,
                invoker = %agent.invoker,
                "Survivor"
            );
        }
        Ok(summary)
    }
}
