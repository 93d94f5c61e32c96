//! Store methods for truck deliveries.

use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::DeliveryEvent,
    types::{format_timestamp, timestamp_column, RowId, SimulationId},
};
use rusqlite::params;

impl TelemetryStore {
    /// Persist one delivery attempt, successful or not.
    /// The success / delivery_time / failure_reason combination is stored as given.
    pub fn insert_delivery_event(&self, e: &DeliveryEvent) -> TelemetryResult<RowId> {
        self.conn.execute(
            "INSERT INTO DeliveryEvents (
                simulation_id, timestamp, truck_id, origin, destination,
                cargo_amount, success, delivery_time, failure_reason
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                e.simulation_id,
                format_timestamp(&e.timestamp),
                e.truck_id,
                e.origin,
                e.destination,
                e.cargo_amount,
                e.success,
                e.delivery_time,
                e.failure_reason,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!(
            "run {}: truck {} {} -> {} success={} (row {id})",
            e.simulation_id, e.truck_id, e.origin, e.destination, e.success
        );
        Ok(id)
    }

    pub fn delivery_events_for_run(
        &self,
        simulation_id: SimulationId,
    ) -> TelemetryResult<Vec<DeliveryEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, simulation_id, timestamp, truck_id, origin, destination,
                    cargo_amount, success, delivery_time, failure_reason
             FROM DeliveryEvents WHERE simulation_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![simulation_id], |row| {
            Ok(DeliveryEvent {
                id:             Some(row.get(0)?),
                simulation_id:  row.get(1)?,
                timestamp:      timestamp_column(row, 2)?,
                truck_id:       row.get(3)?,
                origin:         row.get(4)?,
                destination:    row.get(5)?,
                cargo_amount:   row.get(6)?,
                success:        row.get::<_, i64>(7)? != 0,
                delivery_time:  row.get(8)?,
                failure_reason: row.get(9)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn delivery_event_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM DeliveryEvents WHERE simulation_id = ?1",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Deliveries that did not arrive (for tests and summaries).
    pub fn failed_delivery_count(&self, simulation_id: SimulationId) -> TelemetryResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM DeliveryEvents WHERE simulation_id = ?1 AND success = 0",
            params![simulation_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
