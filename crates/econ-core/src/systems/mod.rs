//! Economy Engine
//!
//! Pure state transitions over `WorldState`: no I/O, no external calls.
//! Randomness comes in through an explicit `Rng` argument, so every function
//! here is deterministic given its inputs.

pub mod deaths;
pub mod rewards;
pub mod transfer;
pub mod upkeep;

pub use deaths::check_deaths;
pub use rewards::grant_random_rewards;
pub use transfer::apply_transfer;
pub use upkeep::{apply_upkeep, UPKEEP_COST};
