//! Energy Economy Engine
//!
//! A fixed roster of agents each hold an energy balance. Every round each
//! living agent is polled through an external decision process, may hand
//! energy to another agent, and pays one unit of upkeep. Agents that run dry
//! die and are respawned as clones of a living agent.

pub mod config;
pub mod driver;
pub mod error;
pub mod invoke;
pub mod logging;
pub mod memory;
pub mod orchestrator;
pub mod persist;
pub mod setup;
pub mod systems;

pub use config::SimulationConfig;
pub use driver::{Outcome, Simulation, SimulationSummary};
pub use error::{EconError, Result};
pub use invoke::{AgentInvoker, CliInvoker, DryRunInvoker, InvocationResult};
pub use orchestrator::{RoundOrchestrator, RoundReport};
pub use persist::{FilePersistence, MemoryPersistence, Persistence};
