//! Shared data types for the agent economy.
//!
//! This crate contains pure data structures with no simulation logic.
//! Everything here serializes to the JSON and JSON Lines formats written by
//! the persistence layer, and is a dependency for the engine crate.

pub mod agent;
pub mod event;
pub mod round;
pub mod world;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use agent::{Agent, Invoker};
pub use event::{details, EventType, WorldEvent};
pub use round::{RoundResult, TransferRequest};
pub use world::WorldState;
