//! File-backed persistence
//!
//! `world.json` holds the latest snapshot and is replaced atomically;
//! `events.jsonl` and `rounds.jsonl` are append-only JSON Lines logs.

use econ_events::{RoundResult, WorldEvent, WorldState};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{PersistError, Persistence};

pub const EVENTS_FILE: &str = "events.jsonl";
pub const ROUNDS_FILE: &str = "rounds.jsonl";

/// Persists the simulation to a data directory and a logs directory
pub struct FilePersistence {
    world_path: PathBuf,
    events: BufWriter<File>,
    rounds: BufWriter<File>,
}

impl FilePersistence {
    /// Open existing logs for appending, so a resumed run continues them
    pub fn open(world_path: impl Into<PathBuf>, logs_dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        Self::with_mode(world_path.into(), logs_dir.as_ref(), false)
    }

    /// Start over: remove any saved world and truncate the logs
    pub fn fresh(world_path: impl Into<PathBuf>, logs_dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        let world_path = world_path.into();
        match fs::remove_file(&world_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Self::with_mode(world_path, logs_dir.as_ref(), true)
    }

    fn with_mode(world_path: PathBuf, logs_dir: &Path, truncate: bool) -> Result<Self, PersistError> {
        if let Some(parent) = world_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(logs_dir)?;
        Ok(Self {
            world_path,
            events: open_log(&logs_dir.join(EVENTS_FILE), truncate)?,
            rounds: open_log(&logs_dir.join(ROUNDS_FILE), truncate)?,
        })
    }

    pub fn world_path(&self) -> &Path {
        &self.world_path
    }
}

fn open_log(path: &Path, truncate: bool) -> std::io::Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.create(true);
    if truncate {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    Ok(BufWriter::new(options.open(path)?))
}

impl Persistence for FilePersistence {
    fn save_world(&mut self, world: &WorldState) -> Result<(), PersistError> {
        let json = world.to_json()?;
        let tmp = self.world_path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.world_path)?;
        Ok(())
    }

    fn load_world(&self) -> Result<Option<WorldState>, PersistError> {
        match fs::read_to_string(&self.world_path) {
            Ok(json) => Ok(Some(WorldState::from_json(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn append_event(&mut self, event: &WorldEvent) -> Result<(), PersistError> {
        writeln!(self.events, "{}", event.to_jsonl()?)?;
        Ok(())
    }

    fn append_round_result(&mut self, result: &RoundResult) -> Result<(), PersistError> {
        writeln!(self.rounds, "{}", result.to_jsonl()?)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PersistError> {
        self.events.flush()?;
        self.rounds.flush()?;
        Ok(())
    }
}

impl Drop for FilePersistence {
    fn drop(&mut self) {
        if let Err(e) = Persistence::flush(self) {
            tracing::warn!(error = %e, "Failed to flush logs");
        }
    }
}
