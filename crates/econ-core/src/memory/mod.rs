//! Private Memory
//!
//! Each agent owns one note file, `<agents_dir>/<name>/self_prompt.md`, that
//! its own invocation may rewrite to carry context into later rounds. This
//! module locates those files and keeps concurrent invocations from leaking
//! into one another's notes.

mod isolation;

pub use isolation::{commit_own_changes, NoteSnapshot};

use econ_events::Agent;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::NOTE_FILE_NAME;

/// Note file error type
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("failed to read note {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write note {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove note {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolves and manipulates agents' note files under one root directory
#[derive(Debug, Clone)]
pub struct NoteStore {
    agents_dir: PathBuf,
}

impl NoteStore {
    pub fn new(agents_dir: impl Into<PathBuf>) -> Self {
        Self {
            agents_dir: agents_dir.into(),
        }
    }

    pub fn agents_dir(&self) -> &Path {
        &self.agents_dir
    }

    /// The agent's private directory
    pub fn dir_for(&self, agent: &Agent) -> PathBuf {
        self.agents_dir.join(agent.dir_name())
    }

    pub fn path_for(&self, agent: &Agent) -> PathBuf {
        self.dir_for(agent).join(NOTE_FILE_NAME)
    }

    /// Current note bytes, `None` when the file does not exist
    pub fn read(&self, agent: &Agent) -> Result<Option<Vec<u8>>, NoteError> {
        let path = self.path_for(agent);
        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(NoteError::Read { path, source }),
        }
    }

    /// Replace the note with `content`. A directory squatting on the note
    /// path is removed first.
    pub fn write(&self, agent: &Agent, content: impl AsRef<[u8]>) -> Result<(), NoteError> {
        let path = self.path_for(agent);
        let result = clear_dir(&path)
            .and_then(|_| fs::create_dir_all(self.dir_for(agent)))
            .and_then(|_| fs::write(&path, content));
        result.map_err(|source| NoteError::Write { path, source })
    }

    /// Delete the note, whether it is a file or a directory. A missing note
    /// is not an error.
    pub fn remove(&self, agent: &Agent) -> Result<(), NoteError> {
        let path = self.path_for(agent);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(NoteError::Remove { path, source }),
        }
    }

    /// Write `content` if present, otherwise make sure no note exists
    pub fn set(&self, agent: &Agent, content: Option<&[u8]>) -> Result<(), NoteError> {
        match content {
            Some(content) => self.write(agent, content),
            None => self.remove(agent),
        }
    }

    /// Make `child`'s note a copy of `parent`'s, removing it if the parent has none
    pub fn copy_between(&self, parent: &Agent, child: &Agent) -> Result<(), NoteError> {
        let content = self.read(parent)?;
        self.set(child, content.as_deref())
    }

    /// Create every agent's private directory
    pub fn ensure_dirs<'a>(&self, agents: impl IntoIterator<Item = &'a Agent>) -> Result<(), NoteError> {
        for agent in agents {
            let path = self.dir_for(agent);
            fs::create_dir_all(&path).map_err(|source| NoteError::Write { path, source })?;
        }
        Ok(())
    }
}

fn clear_dir(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}
