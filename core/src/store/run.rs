//! Store methods for SimulationRuns.

use super::TelemetryStore;
use crate::{
    error::TelemetryResult,
    event::SimulationRun,
    types::{format_timestamp, optional_timestamp_column, timestamp_column, SimulationId},
};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

const RUN_COLUMNS: &str = "id, start_time, end_time, parameters, software_version";

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<SimulationRun> {
    Ok(SimulationRun {
        id:               Some(row.get(0)?),
        start_time:       timestamp_column(row, 1)?,
        end_time:         optional_timestamp_column(row, 2)?,
        parameters:       row.get(3)?,
        software_version: row.get(4)?,
    })
}

impl TelemetryStore {
    /// Insert the run row. Returns the id every event row must reference.
    pub fn start_run(&self, run: &SimulationRun) -> TelemetryResult<SimulationId> {
        self.conn.execute(
            "INSERT INTO SimulationRuns (start_time, end_time, parameters, software_version)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                format_timestamp(&run.start_time),
                run.end_time.as_ref().map(format_timestamp),
                run.parameters,
                run.software_version,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::info!("run {id}: started at {}", format_timestamp(&run.start_time));
        Ok(id)
    }

    /// Stamp `end_time` on a run. Returns false if no such run exists.
    pub fn finish_run(&self, id: SimulationId, end_time: NaiveDateTime) -> TelemetryResult<bool> {
        let updated = self.conn.execute(
            "UPDATE SimulationRuns SET end_time = ?1 WHERE id = ?2",
            params![format_timestamp(&end_time), id],
        )?;
        if updated == 0 {
            log::warn!("run {id}: finish requested for unknown run");
        } else {
            log::info!("run {id}: finished at {}", format_timestamp(&end_time));
        }
        Ok(updated > 0)
    }

    pub fn run(&self, id: SimulationId) -> TelemetryResult<Option<SimulationRun>> {
        let sql = format!("SELECT {RUN_COLUMNS} FROM SimulationRuns WHERE id = ?1");
        let run = self
            .conn
            .query_row(&sql, params![id], run_from_row)
            .optional()?;
        Ok(run)
    }

    /// All runs, oldest first.
    pub fn runs(&self) -> TelemetryResult<Vec<SimulationRun>> {
        let sql = format!("SELECT {RUN_COLUMNS} FROM SimulationRuns ORDER BY id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], run_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn run_count(&self) -> TelemetryResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM SimulationRuns", [], |row| row.get(0))?;
        Ok(count)
    }
}
