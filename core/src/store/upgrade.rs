use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::UpgradeEvent,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::params;

impl TelemetryStore {
    // ── UpgradeEvents ─────────────────────────────────────────────

    pub fn insert_upgrade_event(&self, e: &UpgradeEvent) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO UpgradeEvents (simulation_id, timestamp, upgrade_type, target_entity, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                e.simulation_id,
                format_timestamp(&e.timestamp),
                e.upgrade_type,
                e.target_entity,
                e.description,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!(
            "run {}: upgrade {} on {} (row {id})",
            e.simulation_id, e.upgrade_type, e.target_entity
        );
        Ok(id)
    }

    pub fn upgrade_events_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<UpgradeEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, simulation_id, timestamp, upgrade_type, target_entity, description
             FROM UpgradeEvents WHERE simulation_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![simulation_id], |row| {
            Ok(UpgradeEvent {
                id: Some(row.get(0)?),
                simulation_id: row.get(1)?,
                timestamp: timestamp_column(row, 2)?,
                upgrade_type: row.get(3)?,
                target_entity: row.get(4)?,
                description: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn upgrade_event_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM UpgradeEvents WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
