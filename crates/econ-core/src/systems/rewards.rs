//! Reward System
//!
//! Injects energy into the economy each round to offset upkeep, so that the
//! population is not on a fixed countdown to extinction.

use econ_events::{WorldEvent, WorldState};
use rand::seq::index;
use rand::Rng;

/// Credit `amount` to `min(count, alive)` distinct alive agents chosen
/// uniformly without replacement. One `energy_reward` event per recipient.
pub fn grant_random_rewards<R: Rng + ?Sized>(
    world: &mut WorldState,
    count: usize,
    amount: u64,
    rng: &mut R,
) -> Vec<WorldEvent> {
    let alive = world.alive_indices();
    let picks = count.min(alive.len());
    if picks == 0 || amount == 0 {
        return Vec::new();
    }

    let round = world.round;
    index::sample(rng, alive.len(), picks)
        .into_iter()
        .map(|i| {
            let agent = &mut world.agents[alive[i]];
            agent.energy = agent.energy.saturating_add(amount);
            WorldEvent::energy_reward(round, agent.id.clone(), amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_events::{Agent, EventType, Invoker};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn world() -> WorldState {
        let mut world = WorldState::new(
            (0..6)
                .map(|i| Agent::new(format!("agent-{}", i), format!("A{}", i), 5, Invoker::Claude))
                .collect(),
        );
        world.agents[1].alive = false;
        world.agents[1].energy = 0;
        world.agents[4].alive = false;
        world.agents[4].energy = 0;
        world
    }

    #[test]
    fn test_rewards_distinct_alive_agents() {
        let mut w = world();
        let mut rng = SmallRng::seed_from_u64(42);
        let events = grant_random_rewards(&mut w, 3, 2, &mut rng);

        assert_eq!(events.len(), 3);
        let ids: HashSet<_> = events.iter().map(|e| e.agent_id.clone()).collect();
        assert_eq!(ids.len(), 3);
        for event in &events {
            assert_eq!(event.event_type, EventType::EnergyReward);
            let agent = w.agent(&event.agent_id).unwrap();
            assert!(agent.alive);
            assert_eq!(agent.energy, 7);
        }
        assert_eq!(w.total_energy(), 4 * 5 + 3 * 2);
    }

    #[test]
    fn test_count_capped_at_alive_population() {
        let mut w = world();
        let mut rng = SmallRng::seed_from_u64(1);
        let events = grant_random_rewards(&mut w, 50, 1, &mut rng);
        assert_eq!(events.len(), 4);
        assert_eq!(w.agents[1].energy, 0);
        assert_eq!(w.agents[4].energy, 0);
    }

    #[test]
    fn test_same_seed_same_recipients() {
        let pick = |seed| {
            let mut w = world();
            let mut rng = SmallRng::seed_from_u64(seed);
            grant_random_rewards(&mut w, 2, 1, &mut rng)
                .into_iter()
                .map(|e| e.agent_id)
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(99), pick(99));
    }

    #[test]
    fn test_huge_reward_saturates() {
        let mut w = world();
        let mut rng = SmallRng::seed_from_u64(8);
        let events = grant_random_rewards(&mut w, 10, u64::MAX, &mut rng);
        assert_eq!(events.len(), 4);
        assert!(w.alive_agents().all(|a| a.energy == u64::MAX));
    }

    #[test]
    fn test_extinct_world_gets_nothing() {
        let mut w = world();
        for a in &mut w.agents {
            a.alive = false;
        }
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(grant_random_rewards(&mut w, 2, 5, &mut rng).is_empty());
    }
}
