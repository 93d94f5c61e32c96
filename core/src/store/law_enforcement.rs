use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::LawEnforcementEvent,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::params;

impl TelemetryStore {
    // ── LawEnforcementEvents ──────────────────────────────────────

    pub fn insert_law_enforcement_event(&self, e: &LawEnforcementEvent) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO LawEnforcementEvents (simulation_id, timestamp, event_type, location, impact)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                e.simulation_id,
                format_timestamp(&e.timestamp),
                e.event_type,
                e.location,
                e.impact,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!(
            "run {}: law enforcement {} at {} (row {id})",
            e.simulation_id, e.event_type, e.location
        );
        Ok(id)
    }

    pub fn law_enforcement_events_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<LawEnforcementEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, simulation_id, timestamp, event_type, location, impact
             FROM LawEnforcementEvents WHERE simulation_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![simulation_id], |row| {
            Ok(LawEnforcementEvent {
                id: Some(row.get(0)?),
                simulation_id: row.get(1)?,
                timestamp: timestamp_column(row, 2)?,
                event_type: row.get(3)?,
                location: row.get(4)?,
                impact: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn law_enforcement_event_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM LawEnforcementEvents WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
