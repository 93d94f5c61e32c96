//! Table definitions for the telemetry store.
//!
//! Creation order matters: SimulationRuns is the parent of every other table.

/// Expected shape of one column, as reported by `pragma_table_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub decl_type: &'static str,
    pub not_null: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub ddl: &'static str,
    pub columns: &'static [ColumnDef],
    /// `Some(column)` when the table references SimulationRuns(id).
    pub run_reference: Option<&'static str>,
}

pub const PARENT_TABLE: &str = "SimulationRuns";

const fn pk(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        decl_type: "INTEGER",
        not_null: false,
        primary_key: true,
    }
}

const fn required(name: &'static str, decl_type: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        decl_type,
        not_null: true,
        primary_key: false,
    }
}

const fn optional(name: &'static str, decl_type: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        decl_type,
        not_null: false,
        primary_key: false,
    }
}

pub const SIMULATION_RUNS: TableDef = TableDef {
    name: PARENT_TABLE,
    ddl: include_str!("../../migrations/001_simulation_runs.sql"),
    columns: &[
        pk("id"),
        required("start_time", "DATETIME"),
        optional("end_time", "DATETIME"),
        optional("parameters", "TEXT"),
        optional("software_version", "TEXT"),
    ],
    run_reference: None,
};

pub const PRODUCTION_EVENTS: TableDef = TableDef {
    name: "ProductionEvents",
    ddl: include_str!("../../migrations/002_production_events.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        required("field_name", "TEXT"),
        required("amount_produced", "INTEGER"),
    ],
    run_reference: Some("simulation_id"),
};

pub const PROCESSING_EVENTS: TableDef = TableDef {
    name: "ProcessingEvents",
    ddl: include_str!("../../migrations/003_processing_events.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        required("factory_name", "TEXT"),
        required("raw_amount", "INTEGER"),
        required("processed_amount", "INTEGER"),
    ],
    run_reference: Some("simulation_id"),
};

pub const DELIVERY_EVENTS: TableDef = TableDef {
    name: "DeliveryEvents",
    ddl: include_str!("../../migrations/004_delivery_events.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        required("truck_id", "TEXT"),
        required("origin", "TEXT"),
        required("destination", "TEXT"),
        required("cargo_amount", "INTEGER"),
        required("success", "BOOLEAN"),
        optional("delivery_time", "FLOAT"),
        optional("failure_reason", "TEXT"),
    ],
    run_reference: Some("simulation_id"),
};

pub const LAW_ENFORCEMENT_EVENTS: TableDef = TableDef {
    name: "LawEnforcementEvents",
    ddl: include_str!("../../migrations/005_law_enforcement_events.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        required("event_type", "TEXT"),
        required("location", "TEXT"),
        optional("impact", "TEXT"),
    ],
    run_reference: Some("simulation_id"),
};

pub const STATUS_SNAPSHOTS: TableDef = TableDef {
    name: "StatusSnapshots",
    ddl: include_str!("../../migrations/006_status_snapshots.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        optional("queue_lengths", "TEXT"),
        optional("factory_idle_times", "TEXT"),
        optional("distributor_status", "TEXT"),
    ],
    run_reference: Some("simulation_id"),
};

pub const UPGRADE_EVENTS: TableDef = TableDef {
    name: "UpgradeEvents",
    ddl: include_str!("../../migrations/007_upgrade_events.sql"),
    columns: &[
        pk("id"),
        required("simulation_id", "INTEGER"),
        required("timestamp", "DATETIME"),
        required("upgrade_type", "TEXT"),
        required("target_entity", "TEXT"),
        optional("description", "TEXT"),
    ],
    run_reference: Some("simulation_id"),
};

/// All tables, in creation order.
pub static TABLES: [TableDef; 7] = [
    SIMULATION_RUNS,
    PRODUCTION_EVENTS,
    PROCESSING_EVENTS,
    DELIVERY_EVENTS,
    LAW_ENFORCEMENT_EVENTS,
    STATUS_SNAPSHOTS,
    UPGRADE_EVENTS,
];
