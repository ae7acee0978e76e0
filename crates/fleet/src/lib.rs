//! FleetWatch fleet core
//!
//! This crate provides:
//! - [`Vehicle`]: a validated record whose speed, temperature and fuel are
//!   each updated atomically and independently
//! - [`FleetManager`]: a locked registry of shared vehicles that computes
//!   fleet averages and records threshold alerts at registration time
//!
//! Vehicles are mutated directly by their holders, outside the registry
//! lock. Per-field writes are atomic; fleet-wide reads are not a snapshot.

#![warn(missing_docs)]

pub mod alert;
pub mod error;
pub mod registry;
pub mod vehicle;

pub use alert::{Alert, AlertKind, LOW_FUEL_THRESHOLD, OVERHEAT_THRESHOLD};
pub use error::{FleetError, Result};
pub use registry::{FleetManager, FleetStats};
pub use vehicle::{SharedVehicle, Vehicle, VehicleReading};
