//! Typed rows for the telemetry tables.
//!
//! RULE: `id` is None until the row has been inserted. The store fills it in
//! on read; writers never choose primary keys.

use crate::types::{RowId, SimulationId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub id:               Option<SimulationId>,
    pub start_time:       NaiveDateTime,
    pub end_time:         Option<NaiveDateTime>,
    pub parameters:       Option<String>,
    pub software_version: Option<String>,
}

impl SimulationRun {
    pub fn started_at(start_time: NaiveDateTime) -> Self {
        Self {
            id: None,
            start_time,
            end_time: None,
            parameters: None,
            software_version: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    pub id:              Option<RowId>,
    pub simulation_id:   SimulationId,
    pub timestamp:       NaiveDateTime,
    pub field_name:      String,
    pub amount_produced: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingEvent {
    pub id:               Option<RowId>,
    pub simulation_id:    SimulationId,
    pub timestamp:        NaiveDateTime,
    pub factory_name:     String,
    pub raw_amount:       i64,
    pub processed_amount: i64,
}

/// By convention `delivery_time` is set only on success and
/// `failure_reason` only on failure. Nothing checks this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    pub id:             Option<RowId>,
    pub simulation_id:  SimulationId,
    pub timestamp:      NaiveDateTime,
    pub truck_id:       String,
    pub origin:         String,
    pub destination:    String,
    pub cargo_amount:   i64,
    pub success:        bool,
    pub delivery_time:  Option<f64>,
    pub failure_reason: Option<String>,
}

impl DeliveryEvent {
    pub fn delivered(
        simulation_id: SimulationId,
        timestamp: NaiveDateTime,
        truck_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        cargo_amount: i64,
        delivery_time: f64,
    ) -> Self {
        Self {
            id: None,
            simulation_id,
            timestamp,
            truck_id: truck_id.into(),
            origin: origin.into(),
            destination: destination.into(),
            cargo_amount,
            success: true,
            delivery_time: Some(delivery_time),
            failure_reason: None,
        }
    }

    pub fn failed(
        simulation_id: SimulationId,
        timestamp: NaiveDateTime,
        truck_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        cargo_amount: i64,
        failure_reason: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            simulation_id,
            timestamp,
            truck_id: truck_id.into(),
            origin: origin.into(),
            destination: destination.into(),
            cargo_amount,
            success: false,
            delivery_time: None,
            failure_reason: Some(failure_reason.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawEnforcementEvent {
    pub id:            Option<RowId>,
    pub simulation_id: SimulationId,
    pub timestamp:     NaiveDateTime,
    pub event_type:    String, // "raid" | "checkpoint" | "seizure" | ...
    pub location:      String,
    pub impact:        Option<String>,
}

/// Payload columns hold JSON text; see `payload` for typed builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub id:                 Option<RowId>,
    pub simulation_id:      SimulationId,
    pub timestamp:          NaiveDateTime,
    pub queue_lengths:      Option<String>,
    pub factory_idle_times: Option<String>,
    pub distributor_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeEvent {
    pub id:            Option<RowId>,
    pub simulation_id: SimulationId,
    pub timestamp:     NaiveDateTime,
    pub upgrade_type:  String,
    pub target_entity: String,
    pub description:   Option<String>,
}

/// Any event row a simulation writer can emit.
/// Variants map one-to-one onto the event tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    Production(ProductionEvent),
    Processing(ProcessingEvent),
    Delivery(DeliveryEvent),
    LawEnforcement(LawEnforcementEvent),
    Status(StatusSnapshot),
    Upgrade(UpgradeEvent),
}

impl TelemetryEvent {
    pub fn simulation_id(&self) -> SimulationId {
        match self {
            Self::Production(e)     => e.simulation_id,
            Self::Processing(e)     => e.simulation_id,
            Self::Delivery(e)       => e.simulation_id,
            Self::LawEnforcement(e) => e.simulation_id,
            Self::Status(e)         => e.simulation_id,
            Self::Upgrade(e)        => e.simulation_id,
        }
    }

    /// Name of the table the event is written to.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Production(_)     => "ProductionEvents",
            Self::Processing(_)     => "ProcessingEvents",
            Self::Delivery(_)       => "DeliveryEvents",
            Self::LawEnforcement(_) => "LawEnforcementEvents",
            Self::Status(_)         => "StatusSnapshots",
            Self::Upgrade(_)        => "UpgradeEvents",
        }
    }
}
