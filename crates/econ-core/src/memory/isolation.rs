//! Note isolation across the concurrent phase of a round.
//!
//! The orchestrator captures every note before dispatch, captures them again
//! after all invocations finish, rolls everything back, then re-applies each
//! dispatched agent's own post-round content over its own file only. A note
//! therefore changes across a round iff its owner's invocation changed it.
//!
//! Notes are opaque bytes. A note that cannot be read or written only
//! affects its owner: the failure is logged and the rest of the roster is
//! still isolated.

use econ_events::Agent;
use std::collections::{BTreeMap, HashSet};

use super::{NoteError, NoteStore};

/// Note content per agent id; `None` records an absent or unreadable file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSnapshot {
    notes: BTreeMap<String, Option<Vec<u8>>>,
    unreadable: BTreeMap<String, String>,
}

impl NoteSnapshot {
    /// Read the current note of every agent in `agents`.
    ///
    /// A note that fails to read is recorded as absent and its error kept,
    /// see [`NoteSnapshot::unreadable`].
    pub fn capture<'a>(store: &NoteStore, agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut snapshot = Self::default();
        for agent in agents {
            let content = match store.read(agent) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(agent = %agent.name, error = %e, "Note unreadable, treating as absent");
                    snapshot.unreadable.insert(agent.id.clone(), e.to_string());
                    None
                }
            };
            snapshot.notes.insert(agent.id.clone(), content);
        }
        snapshot
    }

    pub fn get(&self, agent_id: &str) -> Option<Option<&[u8]>> {
        self.notes.get(agent_id).map(|n| n.as_deref())
    }

    /// Why the agent's note could not be read, if it could not
    pub fn unreadable(&self, agent_id: &str) -> Option<&str> {
        self.unreadable.get(agent_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Put every captured note back, deleting files that were absent.
    /// Returns the agents whose note could not be restored.
    pub fn restore<'a>(
        &self,
        store: &NoteStore,
        agents: impl IntoIterator<Item = &'a Agent>,
    ) -> Vec<NoteError> {
        let mut errors = Vec::new();
        for agent in agents {
            let Some(content) = self.notes.get(&agent.id) else {
                continue;
            };
            if let Err(e) = store.set(agent, content.as_deref()) {
                tracing::warn!(agent = %agent.name, error = %e, "Failed to restore note");
                errors.push(e);
            }
        }
        errors
    }
}

/// Roll all notes back to `pre`, then keep each dispatched agent's own
/// change from `post`. An agent whose post-round note was unreadable keeps
/// its `pre` content. Per-agent failures are logged and returned; they never
/// stop the remaining agents from being committed.
pub fn commit_own_changes(
    store: &NoteStore,
    agents: &[Agent],
    pre: &NoteSnapshot,
    post: &NoteSnapshot,
    dispatched: &HashSet<String>,
) -> Vec<NoteError> {
    let mut errors = pre.restore(store, agents);

    for agent in agents.iter().filter(|a| dispatched.contains(&a.id)) {
        if post.unreadable.contains_key(&agent.id) {
            continue;
        }
        let Some(own) = post.notes.get(&agent.id) else {
            continue;
        };
        if pre.notes.get(&agent.id) != Some(own) {
            tracing::debug!(agent = %agent.name, "Keeping own note change");
        }
        if let Err(e) = store.set(agent, own.as_deref()) {
            tracing::warn!(agent = %agent.name, error = %e, "Failed to commit note");
            errors.push(e);
        }
    }
    errors
}
