use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::ProductionEvent,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::params;

impl TelemetryStore {
    // ── ProductionEvents ──────────────────────────────────────────

    pub fn insert_production_event(&self, e: &ProductionEvent) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO ProductionEvents (simulation_id, timestamp, field_name, amount_produced)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                e.simulation_id,
                format_timestamp(&e.timestamp),
                e.field_name,
                e.amount_produced,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!(
            "run {}: production {} +{} (row {id})",
            e.simulation_id, e.field_name, e.amount_produced
        );
        Ok(id)
    }

    pub fn production_events_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<ProductionEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, simulation_id, timestamp, field_name, amount_produced
             FROM ProductionEvents WHERE simulation_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![simulation_id], |row| {
            Ok(ProductionEvent {
                id: Some(row.get(0)?),
                simulation_id: row.get(1)?,
                timestamp: timestamp_column(row, 2)?,
                field_name: row.get(3)?,
                amount_produced: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn production_event_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM ProductionEvents WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
