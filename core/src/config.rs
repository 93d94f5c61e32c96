//! Store configuration.
//!
//! There is no default database location: callers always say where the
//! telemetry store lives.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// Issue `PRAGMA foreign_keys=ON` when the store is opened.
    #[serde(default = "default_true")]
    pub foreign_keys: bool,
    /// Issue `PRAGMA journal_mode=WAL` when the store is opened.
    #[serde(default = "default_true")]
    pub wal: bool,
}

fn default_true() -> bool {
    true
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            foreign_keys: true,
            wal: true,
        }
    }

    /// Load from a JSON file, e.g. `{"db_path": "runs/cartel.db", "wal": false}`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let config: StoreConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid store config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn with_wal(mut self, enabled: bool) -> Self {
        self.wal = enabled;
        self
    }
}
