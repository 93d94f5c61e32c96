//! Store methods for periodic status snapshots.
//!
//! The three payload columns are stored verbatim. Use `payload::encode`
//! to produce them and `payload::decode` to read them back.

use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::StatusSnapshot,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::{params, OptionalExtension};

const SNAPSHOT_COLUMNS: &str =
    "id, simulation_id, timestamp, queue_lengths, factory_idle_times, distributor_status";

fn snapshot_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatusSnapshot> {
    Ok(StatusSnapshot {
        id:                 Some(row.get(0)?),
        simulation_id:      row.get(1)?,
        timestamp:          timestamp_column(row, 2)?,
        queue_lengths:      row.get(3)?,
        factory_idle_times: row.get(4)?,
        distributor_status: row.get(5)?,
    })
}

impl TelemetryStore {
    pub fn insert_status_snapshot(&self, s: &StatusSnapshot) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO StatusSnapshots (
                simulation_id, timestamp, queue_lengths, factory_idle_times, distributor_status
             ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                s.simulation_id,
                format_timestamp(&s.timestamp),
                s.queue_lengths,
                s.factory_idle_times,
                s.distributor_status,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("run {}: status snapshot (row {id})", s.simulation_id);
        Ok(id)
    }

    pub fn status_snapshots_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<StatusSnapshot>> {
        let sql = format!(
            "SELECT {SNAPSHOT_COLUMNS} FROM StatusSnapshots
             WHERE simulation_id = ?1 ORDER BY id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![simulation_id], snapshot_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Most recently inserted snapshot for the run, if any.
    pub fn latest_status_snapshot(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Option<StatusSnapshot>> {
        let sql = format!(
            "SELECT {SNAPSHOT_COLUMNS} FROM StatusSnapshots
             WHERE simulation_id = ?1 ORDER BY id DESC LIMIT 1"
        );
        let snapshot = self
            .conn
            .query_row(&sql, params![simulation_id], snapshot_from_row)
            .optional()?;
        Ok(snapshot)
    }

    pub fn status_snapshot_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM StatusSnapshots WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
