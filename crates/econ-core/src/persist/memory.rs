//! In-memory persistence for tests and embedding.

use econ_events::{RoundResult, WorldEvent, WorldState};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{PersistError, Persistence};

/// Everything a [`MemoryPersistence`] has been handed
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    pub world: Option<WorldState>,
    pub saves: usize,
    pub events: Vec<WorldEvent>,
    pub results: Vec<RoundResult>,
}

/// Records every call; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    log: Arc<Mutex<MemoryLog>>,
    fail_saves: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already saved world
    pub fn with_world(world: WorldState) -> Self {
        let persist = Self::new();
        persist.lock().world = Some(world);
        persist
    }

    /// A sink whose `save_world` always fails
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// A copy of everything recorded so far
    pub fn snapshot(&self) -> MemoryLog {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryLog> {
        // a poisoned log is still readable
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Persistence for MemoryPersistence {
    fn save_world(&mut self, world: &WorldState) -> Result<(), PersistError> {
        if self.fail_saves {
            return Err(PersistError::Unavailable("saves disabled".into()));
        }
        let mut log = self.lock();
        log.world = Some(world.clone());
        log.saves += 1;
        Ok(())
    }

    fn load_world(&self) -> Result<Option<WorldState>, PersistError> {
        Ok(self.lock().world.clone())
    }

    fn append_event(&mut self, event: &WorldEvent) -> Result<(), PersistError> {
        self.lock().events.push(event.clone());
        Ok(())
    }

    fn append_round_result(&mut self, result: &RoundResult) -> Result<(), PersistError> {
        self.lock().results.push(result.clone());
        Ok(())
    }
}
