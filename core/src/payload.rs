//! Versioned JSON payloads for the free-form TEXT columns.
//!
//! SimulationRuns.parameters and the three StatusSnapshots columns are opaque
//! to the store. Writers that want typed content wrap it in a
//! `VersionedPayload` so readers can reject layouts they do not understand.
//! Plain text is still accepted by the store.

use crate::error::{TelemetryError, TelemetryResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedPayload<T> {
    pub version: u32,
    pub data: T,
}

/// Serialize `data` into the current envelope.
pub fn encode<T: Serialize>(data: &T) -> TelemetryResult<String> {
    let envelope = VersionedPayload { version: PAYLOAD_VERSION, data };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse an envelope written by `encode`.
/// Fails with `PayloadVersion` if the envelope was written by another layout.
pub fn decode<T: DeserializeOwned>(text: &str) -> TelemetryResult<T> {
    #[derive(Deserialize)]
    struct Header {
        version: u32,
    }

    let header: Header = serde_json::from_str(text)?;
    if header.version != PAYLOAD_VERSION {
        return Err(TelemetryError::PayloadVersion {
            expected: PAYLOAD_VERSION,
            found: header.version,
        });
    }
    let envelope: VersionedPayload<T> = serde_json::from_str(text)?;
    Ok(envelope.data)
}

/// Simulation parameters recorded on the run row.
pub type RunParameters = BTreeMap<String, serde_json::Value>;

/// Queue name -> items waiting.
pub type QueueLengths = BTreeMap<String, u64>;

/// Factory name -> idle time since the previous snapshot.
pub type FactoryIdleTimes = BTreeMap<String, f64>;

/// Distributor name -> free-form status string.
pub type DistributorStatus = BTreeMap<String, String>;
