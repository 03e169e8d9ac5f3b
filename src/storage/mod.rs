//! Persisted state and the stores layered on top of it.
//!
//! History, goals and settings share one JSON document:
//!
//! ```json
//! { "calculations": [...], "goals": [...], "settings": {...} }
//! ```
//!
//! Every mutation loads the document, changes a copy and hands the whole copy
//! back to the [`StateStore`]. [`JsonFileStore`] writes to a temporary file in
//! the same directory and renames it over the old one, so a failed write
//! leaves the previous document intact.

pub mod history;
pub mod settings;

pub use history::HistoryStore;
pub use settings::SettingsStore;

use crate::calculator::FootprintResult;
use crate::error::{FootprintError, Result};
use crate::goals::Goal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default file name of the persisted document inside the workspace.
pub const HISTORY_FILE_NAME: &str = "carbon_history.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub calculations: Vec<FootprintResult>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// Whole-document persistence boundary.
pub trait StateStore {
    fn load(&self) -> Result<PersistedState>;
    fn save(&self, state: &PersistedState) -> Result<()>;
}

/// [`StateStore`] backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/carbon_history.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn failure(&self, err: impl ToString) -> FootprintError {
        FootprintError::persistence(&self.path, err)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }
        let data = fs::read(&self.path).map_err(|err| self.failure(err))?;
        serde_json::from_slice(&data).map_err(|err| {
            log::warn!("Stored state at {} is not valid JSON: {err}", self.path.display());
            self.failure(format!("invalid JSON: {err}"))
        })
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| self.failure(err))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| self.failure(err))?;
        let data = serde_json::to_vec_pretty(state).map_err(|err| self.failure(err))?;
        tmp.write_all(&data).map_err(|err| self.failure(err))?;
        tmp.as_file().sync_all().map_err(|err| self.failure(err))?;
        tmp.persist(&self.path)
            .map_err(|err| self.failure(err.error))?;
        log::debug!(
            "Saved {} calculations and {} goals to {}",
            state.calculations.len(),
            state.goals.len(),
            self.path.display()
        );
        Ok(())
    }
}
