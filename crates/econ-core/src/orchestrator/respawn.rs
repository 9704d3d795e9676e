//! Respawn: refill dead slots by cloning a living agent's mind.

use econ_events::{WorldEvent, WorldState};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::memory::NoteStore;

/// Revive every dead slot as a child of a uniformly chosen living parent.
///
/// Parents are drawn from the agents alive before this pass, so a slot
/// revived here never parents another. The child takes the parent's invoker
/// and note file, and restarts with `initial_energy` at age 0. A note that
/// cannot be copied leaves the child without one. Does nothing when nobody
/// is alive.
pub fn respawn_dead<R: Rng + ?Sized>(
    world: &mut WorldState,
    notes: &NoteStore,
    initial_energy: u64,
    rng: &mut R,
) -> Vec<WorldEvent> {
    let parents = world.alive_indices();
    if parents.is_empty() {
        return Vec::new();
    }

    let round = world.round;
    let dead: Vec<usize> = (0..world.agents.len()).filter(|&i| !world.agents[i].alive).collect();
    let mut events = Vec::with_capacity(dead.len());
    for child_idx in dead {
        let Some(&parent_idx) = parents.choose(rng) else {
            break;
        };
        let parent = world.agents[parent_idx].clone();

        if let Err(e) = notes.copy_between(&parent, &world.agents[child_idx]) {
            tracing::warn!(child = %world.agents[child_idx].name, parent = %parent.name, error = %e, "Failed to copy note");
            if let Err(e) = notes.remove(&world.agents[child_idx]) {
                tracing::warn!(child = %world.agents[child_idx].name, error = %e, "Failed to clear stale note");
            }
        }

        let child = &mut world.agents[child_idx];
        child.invoker = parent.invoker;
        child.energy = initial_energy;
        child.alive = true;
        child.age = 0;

        tracing::info!(child = %child.name, parent = %parent.name, invoker = %parent.invoker, "Respawned");
        events.push(WorldEvent::respawn(
            round,
            child.id.clone(),
            &parent.id,
            &parent.name,
            parent.invoker,
        ));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_events::{details, Agent, EventType, Invoker};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_children_never_parent() {
        let dir = tempdir().unwrap();
        let notes = NoteStore::new(dir.path());
        let mut world = WorldState::new(
            (0..6)
                .map(|i| Agent::new(format!("agent-{}", i), format!("A{}", i), 0, Invoker::Codex))
                .collect(),
        );
        for a in &mut world.agents {
            a.alive = false;
        }
        world.agents[2].alive = true;
        world.agents[2].energy = 4;
        world.agents[2].invoker = Invoker::Claude;

        let mut rng = SmallRng::seed_from_u64(5);
        let events = respawn_dead(&mut world, &notes, 20, &mut rng);

        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.event_type == EventType::Respawn));
        assert!(events.iter().all(|e| e.detail_str(details::PARENT_ID) == Some("agent-2")));
        assert!(world.agents.iter().all(|a| a.alive && a.invoker == Invoker::Claude));
        assert_eq!(world.agents[2].energy, 4);
        assert_eq!(world.agents[0].energy, 20);
    }

    #[test]
    fn test_extinct_world_stays_extinct() {
        let dir = tempdir().unwrap();
        let notes = NoteStore::new(dir.path());
        let mut world = WorldState::new(vec![Agent::new("agent-0", "Alpha", 0, Invoker::Claude)]);
        world.agents[0].alive = false;

        let mut rng = SmallRng::seed_from_u64(5);
        assert!(respawn_dead(&mut world, &notes, 20, &mut rng).is_empty());
        assert!(world.is_extinct());
    }

    #[test]
    fn test_unreadable_parent_note_leaves_child_blank() {
        let dir = tempdir().unwrap();
        let notes = NoteStore::new(dir.path());
        let mut world = WorldState::new(vec![
            Agent::new("agent-0", "Alpha", 3, Invoker::Claude),
            Agent::new("agent-1", "Beta", 0, Invoker::Codex),
        ]);
        world.agents[1].alive = false;
        std::fs::create_dir_all(notes.path_for(&world.agents[0])).unwrap();
        notes.write(&world.agents[1], "stale").unwrap();

        let mut rng = SmallRng::seed_from_u64(5);
        let events = respawn_dead(&mut world, &notes, 20, &mut rng);

        assert_eq!(events.len(), 1);
        assert!(world.agents[1].alive);
        assert_eq!(notes.read(&world.agents[1]).unwrap(), None);
    }
}
