//! Transfer intent extraction from free text.

use econ_events::TransferRequest;
use once_cell::sync::Lazy;
use regex::Regex;

static TRANSFER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TRANSFER\s+(\d+)\s+TO\s+(\w+)").expect("transfer pattern is valid"));

/// Find the first `TRANSFER <amount> TO <name>` in `text`, ignoring case.
///
/// Only the first match is considered. A zero or unparseable amount yields
/// `None` rather than falling through to a later match.
pub fn parse_transfer(text: &str) -> Option<TransferRequest> {
    let caps = TRANSFER_RE.captures(text)?;
    let amount: u64 = caps[1].parse().ok()?;
    if amount == 0 {
        return None;
    }
    Some(TransferRequest::new(&caps[2], amount))
}
