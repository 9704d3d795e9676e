//! Error types for the economy engine.

use thiserror::Error;

use crate::config::ConfigError;
use crate::memory::NoteError;
use crate::persist::PersistError;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EconError>;

/// Errors that can stop a simulation run.
///
/// Invocation failures are not here: they are absorbed per agent at the round
/// boundary and never surface as errors.
#[derive(Error, Debug)]
pub enum EconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Note file error: {0}")]
    Note(#[from] NoteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
