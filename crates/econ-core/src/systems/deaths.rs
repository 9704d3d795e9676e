//! Death sweep
//!
//! Idempotent safety pass run after all per-agent effects and rewards, so
//! that no zero-balance agent is still marked alive when respawn runs.

use econ_events::{WorldEvent, WorldState};

/// Mark every alive agent with an empty balance as dead.
///
/// Emits one `death` event per newly dead agent. Running it twice in a row
/// emits nothing the second time.
pub fn check_deaths(world: &mut WorldState) -> Vec<WorldEvent> {
    let round = world.round;
    world
        .agents
        .iter_mut()
        .filter(|a| a.alive && a.energy == 0)
        .map(|agent| {
            agent.alive = false;
            WorldEvent::death(round, agent.id.clone(), agent.age)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_events::{Agent, EventType, Invoker};

    #[test]
    fn test_marks_zero_energy_agents_dead() {
        let mut world = WorldState::new(vec![
            Agent::new("agent-0", "Alpha", 0, Invoker::Claude),
            Agent::new("agent-1", "Beta", 4, Invoker::Claude),
        ]);
        world.round = 3;

        let events = check_deaths(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Death);
        assert_eq!(events[0].agent_id, "agent-0");
        assert!(!world.agents[0].alive);
        assert!(world.agents[1].alive);
    }

    #[test]
    fn test_is_idempotent() {
        let mut world = WorldState::new(vec![Agent::new("agent-0", "Alpha", 0, Invoker::Codex)]);
        assert_eq!(check_deaths(&mut world).len(), 1);
        assert!(check_deaths(&mut world).is_empty());
    }

    #[test]
    fn test_already_dead_agents_are_skipped() {
        let mut world = WorldState::new(vec![Agent::new("agent-0", "Alpha", 0, Invoker::Codex)]);
        world.agents[0].alive = false;
        assert!(check_deaths(&mut world).is_empty());
    }
}
