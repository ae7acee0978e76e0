//! Core functionality for the FleetWatch telemetry workspace.
//!
//! This crate provides the configuration model, logging initialisation and
//! the shared error type used by the fleet, ingest and simulation crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, IngestConfig, LoggingConfig, SimulationConfig};
pub use error::{CoreError, Result};
