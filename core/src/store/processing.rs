use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::ProcessingEvent,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::params;

impl TelemetryStore {
    // ── ProcessingEvents ──────────────────────────────────────────

    pub fn insert_processing_event(&self, e: &ProcessingEvent) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO ProcessingEvents (simulation_id, timestamp, factory_name, raw_amount, processed_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                e.simulation_id,
                format_timestamp(&e.timestamp),
                e.factory_name,
                e.raw_amount,
                e.processed_amount,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!(
            "run {}: processing at {} {} -> {} (row {id})",
            e.simulation_id, e.factory_name, e.raw_amount, e.processed_amount
        );
        Ok(id)
    }

    pub fn processing_events_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<ProcessingEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, simulation_id, timestamp, factory_name, raw_amount, processed_amount
             FROM ProcessingEvents WHERE simulation_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![simulation_id], |row| {
            Ok(ProcessingEvent {
                id: Some(row.get(0)?),
                simulation_id: row.get(1)?,
                timestamp: timestamp_column(row, 2)?,
                factory_name: row.get(3)?,
                raw_amount: row.get(4)?,
                processed_amount: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn processing_event_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM ProcessingEvents WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
