//! Transfer System
//!
//! Moves energy from one agent to another. Transfers never create debt: a
//! sender gives at most its current balance.

use econ_events::{TransferRequest, WorldEvent, WorldState};

/// Apply a transfer intent from the agent at roster index `sender`.
///
/// Silently ignored (no events, no balance change) when the amount is zero,
/// or when no alive agent other than the sender carries the target name.
/// Otherwise `min(amount, sender.energy)` moves from sender to receiver and a
/// single `transfer` event records the actual amount.
pub fn apply_transfer(
    world: &mut WorldState,
    sender: usize,
    request: &TransferRequest,
) -> Vec<WorldEvent> {
    if request.amount == 0 {
        return Vec::new();
    }
    let Some(sender_agent) = world.agents.get(sender) else {
        return Vec::new();
    };
    let sender_id = sender_agent.id.clone();
    let Some(receiver) = world.transfer_target(&request.to, &sender_id) else {
        tracing::debug!(sender = %sender_id, to = %request.to, "Transfer target invalid, ignored");
        return Vec::new();
    };

    let actual = request.amount.min(world.agents[sender].energy);
    world.agents[sender].energy -= actual;
    world.agents[receiver].energy = world.agents[receiver].energy.saturating_add(actual);

    let receiver_agent = &world.agents[receiver];
    vec![WorldEvent::transfer(
        world.round,
        sender_id,
        &receiver_agent.id,
        &receiver_agent.name,
        actual,
    )]
}
