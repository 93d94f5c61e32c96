//! One-shot schema creation.

use crate::{config::StoreConfig, error::TelemetryResult, store::TelemetryStore};

/// Ensure every telemetry table exists at `config.db_path`.
///
/// Creates the database file if it is missing. Safe to run repeatedly.
/// The connection is released on every exit path.
pub fn initialize_schema(config: &StoreConfig) -> TelemetryResult<()> {
    let mut store = TelemetryStore::open(config)?;
    store.initialize()?;
    store.close()
}

/// Like `initialize_schema`, then checks the live tables against their
/// definitions. Catches tables that predate the current layout.
pub fn initialize_and_verify(config: &StoreConfig) -> TelemetryResult<()> {
    let mut store = TelemetryStore::open(config)?;
    store.initialize()?;
    store.verify()?;
    store.close()
}
