//! Configuration primitives for CarbonTrack.
//!
//! Stored in a machine-readable TOML file located at:
//!   $CARBONTRACK_HOME/config/config.toml when the variable is set
//!   %APPDATA%/CarbonTrack/config/config.toml on Windows
//!   $XDG_DATA_HOME/CarbonTrack/config/config.toml on Linux
//!   ~/Library/Application Support/CarbonTrack/config/config.toml on macOS
//!
//! The config selects the reporting period, the history file and an optional
//! external emission factor table.

use crate::calculator::CalculationSettings;
use crate::factors::EmissionFactorTable;
use crate::storage::{JsonFileStore, HISTORY_FILE_NAME};
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the workspace root.
pub const HOME_ENV_VAR: &str = "CARBONTRACK_HOME";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Reporting period and commuting assumptions.
    #[serde(default)]
    pub calculation: CalculationSettings,
    /// Where history, goals and settings are kept.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Emission factor source.
    #[serde(default)]
    pub factors: FactorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// File name (relative to the data directory) or absolute path.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
        }
    }
}

fn default_history_file() -> PathBuf {
    PathBuf::from(HISTORY_FILE_NAME)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FactorSettings {
    /// External factor table; the built-in table is used when unset.
    #[serde(default)]
    pub table_path: Option<PathBuf>,
}

impl AppConfig {
    /// History store resolved against the workspace data directory.
    pub fn history_store(&self, paths: &WorkspacePaths) -> JsonFileStore {
        JsonFileStore::new(paths.data_dir.join(&self.storage.history_file))
    }

    pub fn load_factor_table(&self) -> Result<EmissionFactorTable> {
        let table = match &self.factors.table_path {
            Some(path) => EmissionFactorTable::from_path(path)
                .with_context(|| format!("Failed to load emission factors {}", path.display()))?,
            None => EmissionFactorTable::builtin()
                .context("Built-in emission factors are invalid")?,
        };
        Ok(table)
    }
}

/// Returns the root directory where CarbonTrack stores data.
///
/// Order of precedence:
/// 1. `CARBONTRACK_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("CarbonTrack"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(WorkspacePaths::new(workspace_root()?).config_file())
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    load_from(&config_file_path()?)
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to `path`, creating its directory.
pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

/// Ensures the workspace structure exists (config/ and data/ directories).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let paths = WorkspacePaths::new(workspace_root()?);
    paths.ensure()?;
    Ok(paths)
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: PathBuf) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            root,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.data_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}
