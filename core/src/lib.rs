//! Telemetry store for the cartel-economics simulation.
//!
//! The simulation itself lives elsewhere. This crate owns the SQLite schema
//! its runs are recorded into, plus typed access to the rows.

pub mod config;
pub mod error;
pub mod event;
pub mod initializer;
pub mod payload;
pub mod schema;
pub mod store;
pub mod types;
