//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Writers hand it typed records from `event` and never execute SQL directly.

use crate::{
    config::StoreConfig,
    error::TelemetryResult,
    event::TelemetryEvent,
    schema::TABLES,
    types::RowId,
};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

mod catalog;
mod delivery;
mod law_enforcement;
mod processing;
mod production;
mod run;
mod status;
mod upgrade;

pub use catalog::{ColumnInfo, ForeignKeyInfo};

/// Owns the single connection to a telemetry database.
/// Dropping the store releases the connection.
pub struct TelemetryStore {
    conn: Connection,
}

impl TelemetryStore {
    /// Open (or create) the database described by `config`.
    pub fn open(config: &StoreConfig) -> TelemetryResult<Self> {
        let conn = Connection::open_with_flags(
            &config.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        if config.wal {
            enable_wal(&conn, &config.db_path);
        }
        set_foreign_keys(&conn, config.foreign_keys)?;
        log::debug!(
            "store: opened {} (foreign_keys={}, wal={})",
            config.db_path.display(),
            config.foreign_keys,
            config.wal
        );
        Ok(Self { conn })
    }

    /// Open a file with the default pragmas.
    pub fn open_path(path: impl Into<PathBuf>) -> TelemetryResult<Self> {
        Self::open(&StoreConfig::new(path))
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TelemetryResult<Self> {
        let conn = Connection::open_in_memory()?;
        set_foreign_keys(&conn, true)?;
        Ok(Self { conn })
    }

    /// Current `PRAGMA journal_mode`, lower-cased ("wal", "delete", "memory", ...).
    pub fn journal_mode(&self) -> TelemetryResult<String> {
        let mode: String = self
            .conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
        Ok(mode.to_ascii_lowercase())
    }

    pub fn foreign_keys_enabled(&self) -> TelemetryResult<bool> {
        let enabled: i64 = self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled != 0)
    }

    /// Create every missing table in a single transaction.
    ///
    /// Existing tables are left untouched, so running this against an
    /// initialized database is a no-op. If any statement fails the
    /// transaction is dropped uncommitted and nothing is persisted.
    pub fn initialize(&mut self) -> TelemetryResult<()> {
        let tx = self.conn.transaction()?;
        for table in TABLES.iter() {
            tx.execute_batch(table.ddl)?;
            log::debug!("schema: ensured table {}", table.name);
        }
        tx.commit()?;
        log::info!("schema: {} tables ready", TABLES.len());
        Ok(())
    }

    /// Write any event row. Returns the new row id.
    pub fn record(&self, event: &TelemetryEvent) -> TelemetryResult<RowId> {
        match event {
            TelemetryEvent::Production(e)     => self.insert_production_event(e),
            TelemetryEvent::Processing(e)     => self.insert_processing_event(e),
            TelemetryEvent::Delivery(e)       => self.insert_delivery_event(e),
            TelemetryEvent::LawEnforcement(e) => self.insert_law_enforcement_event(e),
            TelemetryEvent::Status(e)         => self.insert_status_snapshot(e),
            TelemetryEvent::Upgrade(e)        => self.insert_upgrade_event(e),
        }
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> TelemetryResult<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

fn set_foreign_keys(conn: &Connection, enabled: bool) -> TelemetryResult<()> {
    let sql = if enabled {
        "PRAGMA foreign_keys=ON;"
    } else {
        "PRAGMA foreign_keys=OFF;"
    };
    conn.execute_batch(sql)?;
    Ok(())
}

/// True for `:memory:` and `file:...?mode=memory` URIs.
fn is_in_memory(path: &Path) -> bool {
    let path = path.to_string_lossy();
    path == ":memory:" || path.contains("mode=memory")
}

/// Switch a file-backed store to WAL. A failed switch leaves the store usable
/// in its previous journal mode, so it is logged rather than returned.
fn enable_wal(conn: &Connection, path: &Path) {
    if is_in_memory(path) {
        // In-memory databases report "memory" and never use WAL.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        return;
    }
    match conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get::<_, String>(0)) {
        Ok(mode) if mode.eq_ignore_ascii_case("wal") => {}
        Ok(mode) => log::warn!(
            "store: requested WAL for {} but journal_mode is {mode}",
            path.display()
        ),
        Err(e) => log::warn!("store: could not enable WAL for {}: {e}", path.display()),
    }
}
