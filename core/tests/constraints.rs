//! NOT NULL and foreign-key behaviour of the created tables.
//!
//! Raw inserts go through a second connection on the same file so that rows
//! the typed API cannot express (missing required columns) can be attempted.

use cartel_telemetry_core::{
    config::StoreConfig,
    error::TelemetryError,
    event::{ProductionEvent, SimulationRun, StatusSnapshot},
    initializer::initialize_schema,
    store::TelemetryStore,
};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use tempfile::TempDir;

fn ts(s: &str) -> NaiveDateTime {
    s.parse().expect("valid timestamp")
}

fn initialized_file() -> (TempDir, StoreConfig) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = StoreConfig::new(dir.path().join("constraints.db"));
    initialize_schema(&config).expect("initialize");
    (dir, config)
}

fn assert_not_null_violation(result: rusqlite::Result<usize>, column: &str) {
    let err = result.expect_err("insert should have been rejected");
    let msg = err.to_string();
    assert!(
        msg.contains("NOT NULL constraint failed") && msg.contains(column),
        "unexpected error for {column}: {msg}"
    );
}

#[test]
fn run_without_start_time_is_rejected() {
    let (_dir, config) = initialized_file();
    let conn = Connection::open(&config.db_path).unwrap();

    let result = conn.execute(
        "INSERT INTO SimulationRuns (software_version) VALUES ('0.1.0')",
        [],
    );
    assert_not_null_violation(result, "SimulationRuns.start_time");
}

#[test]
fn delivery_without_success_flag_is_rejected() {
    let (_dir, config) = initialized_file();
    let conn = Connection::open(&config.db_path).unwrap();
    conn.execute(
        "INSERT INTO SimulationRuns (start_time) VALUES ('2024-01-01T00:00:00')",
        [],
    )
    .unwrap();

    let result = conn.execute(
        "INSERT INTO DeliveryEvents
            (simulation_id, timestamp, truck_id, origin, destination, cargo_amount)
         VALUES (1, '2024-01-01T01:00:00', 'T-1', 'farm', 'port', 40)",
        [],
    );
    assert_not_null_violation(result, "DeliveryEvents.success");
}

#[test]
fn optional_columns_accept_null() {
    let (_dir, config) = initialized_file();
    let store = TelemetryStore::open(&config).unwrap();
    let run_id = store
        .start_run(&SimulationRun::started_at(ts("2024-01-01T00:00:00")))
        .unwrap();

    store
        .insert_status_snapshot(&StatusSnapshot {
            id: None,
            simulation_id: run_id,
            timestamp: ts("2024-01-01T06:00:00"),
            queue_lengths: None,
            factory_idle_times: None,
            distributor_status: None,
        })
        .unwrap();

    let run = store.run(run_id).unwrap().expect("run exists");
    assert_eq!(run.end_time, None);
    assert_eq!(run.parameters, None);
    assert_eq!(run.software_version, None);
    assert_eq!(store.status_snapshot_count(run_id).unwrap(), 1);
}

#[test]
fn orphan_event_rejected_when_foreign_keys_enforced() {
    let (_dir, config) = initialized_file();
    let store = TelemetryStore::open(&config).unwrap();
    assert!(store.foreign_keys_enabled().unwrap());

    let err = store
        .insert_production_event(&ProductionEvent {
            id: None,
            simulation_id: 999,
            timestamp: ts("2024-01-01T00:00:00"),
            field_name: "north-field".into(),
            amount_produced: 10,
        })
        .unwrap_err();
    match err {
        TelemetryError::Database(e) => assert!(
            e.to_string().contains("FOREIGN KEY constraint failed"),
            "unexpected error: {e}"
        ),
        other => panic!("expected database error, got {other:?}"),
    }
    assert_eq!(store.production_event_count(999).unwrap(), 0);
}

/// Enforcement is a property of the connection, not of the schema.
#[test]
fn orphan_event_accepted_when_foreign_keys_disabled() {
    let (_dir, config) = initialized_file();
    let store = TelemetryStore::open(&config.clone().with_foreign_keys(false)).unwrap();
    assert!(!store.foreign_keys_enabled().unwrap());

    store
        .insert_production_event(&ProductionEvent {
            id: None,
            simulation_id: 999,
            timestamp: ts("2024-01-01T00:00:00"),
            field_name: "north-field".into(),
            amount_produced: 10,
        })
        .expect("no enforcement on this connection");
    assert_eq!(store.production_event_count(999).unwrap(), 1);
}

#[test]
fn event_with_known_run_is_accepted() {
    let (_dir, config) = initialized_file();
    let store = TelemetryStore::open(&config).unwrap();
    let run_id = store
        .start_run(&SimulationRun::started_at(ts("2024-01-01T00:00:00")))
        .unwrap();

    let id = store
        .insert_production_event(&ProductionEvent {
            id: None,
            simulation_id: run_id,
            timestamp: ts("2024-01-01T00:30:00"),
            field_name: "north-field".into(),
            amount_produced: 25,
        })
        .unwrap();
    assert!(id > 0);
}
