//! Round Orchestrator
//!
//! Drives one round end to end. Invocations run concurrently, but every
//! state change happens afterwards, on this task, in the cohort order drawn
//! at the start of the round. Given the same seed and the same invocation
//! outputs a round always produces the same world and the same events.

mod dispatch;
mod respawn;

pub use dispatch::dispatch_cohort;
pub use respawn::respawn_dead;

use econ_events::{RoundResult, WorldEvent, WorldState};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::SimulationConfig;
use crate::invoke::AgentInvoker;
use crate::memory::{commit_own_changes, NoteSnapshot, NoteStore};
use crate::persist::Persistence;
use crate::systems::{apply_transfer, apply_upkeep, check_deaths, grant_random_rewards};

/// Everything that happened in one round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundReport {
    pub round: u64,
    /// One entry per dispatched agent, in application order
    pub results: Vec<RoundResult>,
    pub reward_events: Vec<WorldEvent>,
    /// Deaths caught by the sweep after rewards
    pub death_events: Vec<WorldEvent>,
    pub respawn_events: Vec<WorldEvent>,
    /// Alive count at the end of the round
    pub alive: usize,
}

impl RoundReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.failed()).count()
    }

    pub fn transfers(&self) -> usize {
        self.results.iter().filter(|r| r.transfer.is_some()).count()
    }

    /// Deaths from upkeep plus deaths from the sweep
    pub fn deaths(&self) -> usize {
        self.results.iter().filter(|r| r.died()).count() + self.death_events.len()
    }

    /// All events of the round in emission order
    pub fn events(&self) -> impl Iterator<Item = &WorldEvent> {
        self.results
            .iter()
            .flat_map(|r| r.events.iter())
            .chain(&self.reward_events)
            .chain(&self.death_events)
            .chain(&self.respawn_events)
    }
}

/// Owns the round machinery and the injected collaborators
pub struct RoundOrchestrator {
    config: SimulationConfig,
    rng: SmallRng,
    notes: NoteStore,
    invoker: Arc<dyn AgentInvoker>,
    persist: Box<dyn Persistence>,
}

impl RoundOrchestrator {
    pub fn new(
        config: SimulationConfig,
        seed: u64,
        invoker: Arc<dyn AgentInvoker>,
        persist: Box<dyn Persistence>,
    ) -> Self {
        Self {
            notes: NoteStore::new(&config.agents_dir),
            rng: SmallRng::seed_from_u64(seed),
            config,
            invoker,
            persist,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn persistence(&mut self) -> &mut dyn Persistence {
        self.persist.as_mut()
    }

    /// Run one full round against `world`.
    ///
    /// Invocation failures and unusable note files are absorbed into the
    /// round's results. The only error returned here is a failed world save.
    pub async fn run_round(&mut self, world: &mut WorldState) -> crate::Result<RoundReport> {
        world.round += 1;
        let round = world.round;

        let mut cohort = world.alive_indices();
        cohort.shuffle(&mut self.rng);
        tracing::info!(round, cohort = cohort.len(), invoker = self.invoker.name(), "Round started");

        let pre = NoteSnapshot::capture(&self.notes, &world.agents);
        let energy_before: Vec<u64> = cohort.iter().map(|&i| world.agents[i].energy).collect();

        let outcomes = dispatch_cohort(
            Arc::clone(&self.invoker),
            world,
            &cohort,
            self.config.concurrency,
            self.config.round_timeout(),
        )
        .await;
        let post = NoteSnapshot::capture(&self.notes, &world.agents);

        let mut results = Vec::with_capacity(cohort.len());
        for ((&idx, outcome), before) in cohort.iter().zip(outcomes).zip(energy_before) {
            let mut events = Vec::new();
            if let Some(error) = &outcome.error {
                events.push(WorldEvent::invocation_error(round, world.agents[idx].id.clone(), error));
            }
            if let Some(error) = post.unreadable(&world.agents[idx].id) {
                events.push(WorldEvent::invocation_error(
                    round,
                    world.agents[idx].id.clone(),
                    &format!("note unreadable: {}", error),
                ));
            }
            if let Some(request) = &outcome.transfer {
                events.extend(apply_transfer(world, idx, request));
            }
            events.extend(apply_upkeep(&mut world.agents[idx], round));

            let agent = &world.agents[idx];
            tracing::debug!(
                agent = %agent.name,
                before,
                after = agent.energy,
                transfer = outcome.transfer.is_some(),
                failed = outcome.error.is_some(),
                "Applied effects"
            );
            let result = RoundResult {
                agent_id: agent.id.clone(),
                agent_name: agent.name.clone(),
                transfer: outcome.transfer,
                raw_output: outcome.raw_output,
                energy_before: before,
                energy_after: agent.energy,
                events,
            };
            self.record_result(&result);
            results.push(result);
        }

        let dispatched: HashSet<String> = cohort.iter().map(|&i| world.agents[i].id.clone()).collect();
        let note_errors = commit_own_changes(&self.notes, &world.agents, &pre, &post, &dispatched);
        if !note_errors.is_empty() {
            tracing::warn!(round, count = note_errors.len(), "Some notes could not be isolated");
        }

        let reward_events = grant_random_rewards(
            world,
            self.config.energy_reward_count,
            self.config.energy_reward_amount,
            &mut self.rng,
        );
        self.record_events(&reward_events);

        let death_events = check_deaths(world);
        self.record_events(&death_events);

        let respawn_events = respawn_dead(world, &self.notes, self.config.initial_energy, &mut self.rng);
        self.record_events(&respawn_events);

        self.persist.save_world(world)?;
        if let Err(e) = self.persist.flush() {
            tracing::warn!(round, error = %e, "Failed to flush logs");
        }

        let report = RoundReport {
            round,
            results,
            reward_events,
            death_events,
            respawn_events,
            alive: world.alive_count(),
        };
        tracing::info!(
            round,
            alive = report.alive,
            transfers = report.transfers(),
            deaths = report.deaths(),
            respawns = report.respawn_events.len(),
            failures = report.failures(),
            total_energy = world.total_energy(),
            "Round complete"
        );
        Ok(report)
    }

    fn record_result(&mut self, result: &RoundResult) {
        self.record_events(&result.events);
        if let Err(e) = self.persist.append_round_result(result) {
            tracing::warn!(agent = %result.agent_name, error = %e, "Failed to append round result");
        }
    }

    fn record_events(&mut self, events: &[WorldEvent]) {
        if let Err(e) = self.persist.append_events(events) {
            tracing::warn!(error = %e, "Failed to append events");
        }
    }
}

impl std::fmt::Debug for RoundOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundOrchestrator")
            .field("invoker", &self.invoker)
            .field("agents_dir", &self.notes.agents_dir())
            .finish_non_exhaustive()
    }
}
