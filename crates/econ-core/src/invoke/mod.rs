//! Invocation Adapters
//!
//! The orchestrator only needs one capability from the outside world: given
//! an agent and a read-only view of the world, produce an optional transfer
//! intent and the raw text the agent answered with. Adapters never fail past
//! this boundary; internal errors come back as [`InvocationResult::failed`].

mod cli;
mod dry_run;
mod parse;
mod prompt;

pub use cli::{extract_claude_text, CliInvoker, InvokeError};
pub use dry_run::{DryRunInvoker, DRY_RUN_RESPONSES};
pub use parse::parse_transfer;
pub use prompt::build_prompt;

use async_trait::async_trait;
use econ_events::{Agent, TransferRequest, WorldState};
use std::time::Duration;

/// Prefix marking `raw_output` of a failed invocation
pub const ERROR_MARKER: &str = "ERROR: ";

/// Outcome of polling one agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub transfer: Option<TransferRequest>,
    pub raw_output: String,
    /// Set when the invocation failed; `raw_output` then carries the marker
    pub error: Option<String>,
}

impl InvocationResult {
    /// Successful answer; the transfer intent is parsed from `raw_output`
    pub fn from_output(raw_output: impl Into<String>) -> Self {
        let raw_output = raw_output.into();
        Self {
            transfer: parse_transfer(&raw_output),
            raw_output,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            transfer: None,
            raw_output: format!("{}{}", ERROR_MARKER, message),
            error: Some(message),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs one agent's external decision process
#[async_trait]
pub trait AgentInvoker: Send + Sync + std::fmt::Debug {
    /// Short label for logs
    fn name(&self) -> &str;

    /// Poll `agent` once. Must honour `timeout` and must not panic on
    /// process or parse failures.
    async fn invoke(&self, agent: &Agent, world: &WorldState, timeout: Duration) -> InvocationResult;
}
