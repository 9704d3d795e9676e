//! Persistence Adapters
//!
//! The orchestrator hands every world snapshot, event and round result to an
//! injected [`Persistence`] sink instead of writing files itself.

mod file;
mod memory;

pub use file::{FilePersistence, EVENTS_FILE, ROUNDS_FILE};
pub use memory::{MemoryLog, MemoryPersistence};

use econ_events::{RoundResult, WorldEvent, WorldState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Sink for world snapshots and append-only logs
pub trait Persistence: Send {
    fn save_world(&mut self, world: &WorldState) -> Result<(), PersistError>;

    /// The last saved world, `None` when nothing was saved yet
    fn load_world(&self) -> Result<Option<WorldState>, PersistError>;

    fn append_event(&mut self, event: &WorldEvent) -> Result<(), PersistError>;

    fn append_round_result(&mut self, result: &RoundResult) -> Result<(), PersistError>;

    fn append_events(&mut self, events: &[WorldEvent]) -> Result<(), PersistError> {
        for event in events {
            self.append_event(event)?;
        }
        Ok(())
    }

    /// Push buffered records to durable storage
    fn flush(&mut self) -> Result<(), PersistError> {
        Ok(())
    }
}
