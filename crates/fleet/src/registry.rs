//! Fleet registry
//!
//! [`FleetManager`] owns an append-only list of shared vehicles and an
//! append-only list of alerts behind one mutex. Every registry operation
//! takes that lock. Vehicle fields are not covered by it: mutators update
//! vehicles directly, so an average sees each field's latest completed write
//! but not a fleet-wide snapshot.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::alert::{self, Alert};
use crate::error::{FleetError, Result};
use crate::vehicle::{SharedVehicle, Vehicle};

#[derive(Debug, Default)]
struct FleetState {
    vehicles: Vec<SharedVehicle>,
    /// Frozen at registration time, never recomputed
    alerts: Vec<Alert>,
}

/// Aggregates computed in a single lock hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetStats {
    /// Number of registered vehicles
    pub vehicle_count: usize,
    /// Mean speed
    pub average_speed: f64,
    /// Mean engine temperature
    pub average_temperature: f64,
    /// Mean fuel percentage
    pub average_fuel: f64,
}

/// Thread-safe fleet registry
#[derive(Debug, Default)]
pub struct FleetManager {
    state: Mutex<FleetState>,
}

impl FleetManager {
    /// Create an empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fleet and register `initial` in order
    pub fn with_vehicles<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = SharedVehicle>,
    {
        let manager = Self::new();
        for vehicle in initial {
            manager.register(vehicle);
        }
        manager
    }

    // Registry data is append-only, so a panicking holder cannot leave it
    // half-updated and the guard is safe to recover.
    fn lock(&self) -> MutexGuard<'_, FleetState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Fleet registry lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Add a vehicle and evaluate the alert policy against its current values.
    ///
    /// The append and the evaluation happen under the same lock hold. Later
    /// changes to the vehicle never add, remove or update its alerts.
    pub fn register(&self, vehicle: impl Into<SharedVehicle>) {
        let vehicle = vehicle.into();
        let mut state = self.lock();

        let raised = alert::evaluate(&vehicle);
        for alert in &raised {
            warn!(vehicle_id = %alert.vehicle_id, kind = ?alert.kind, observed = alert.observed, "Alert raised");
        }

        let vehicle_id = vehicle.id().to_string();
        state.vehicles.push(vehicle);
        state.alerts.extend(raised);
        debug!(%vehicle_id, vehicle_count = state.vehicles.len(), "Vehicle registered");
    }

    /// Validate raw field values and register the resulting vehicle.
    ///
    /// Nothing is added when validation fails.
    pub fn register_raw(
        &self,
        id: impl Into<String>,
        speed: f64,
        temperature: f64,
        fuel: f64,
    ) -> Result<SharedVehicle> {
        let vehicle = Vehicle::shared(id, speed, temperature, fuel)?;
        self.register(SharedVehicle::clone(&vehicle));
        Ok(vehicle)
    }

    /// Mean speed across all vehicles
    pub fn average_speed(&self) -> Result<f64> {
        mean(&self.lock().vehicles, Vehicle::speed)
    }

    /// Mean engine temperature across all vehicles
    pub fn average_temperature(&self) -> Result<f64> {
        mean(&self.lock().vehicles, Vehicle::temperature)
    }

    /// Mean fuel percentage across all vehicles
    pub fn average_fuel(&self) -> Result<f64> {
        mean(&self.lock().vehicles, Vehicle::fuel)
    }

    /// All three averages from one lock hold.
    ///
    /// Each vehicle field is still read independently, so the three means do
    /// not describe one instant.
    pub fn stats(&self) -> Result<FleetStats> {
        let state = self.lock();
        Ok(FleetStats {
            vehicle_count: state.vehicles.len(),
            average_speed: mean(&state.vehicles, Vehicle::speed)?,
            average_temperature: mean(&state.vehicles, Vehicle::temperature)?,
            average_fuel: mean(&state.vehicles, Vehicle::fuel)?,
        })
    }

    /// Copy of the alert messages, in the order they were raised
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.iter().map(ToString::to_string).collect()
    }

    /// Copy of the typed alert records
    pub fn alert_records(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    /// Copy of the member list. The vehicles themselves stay shared.
    pub fn vehicles(&self) -> Vec<SharedVehicle> {
        self.lock().vehicles.clone()
    }

    /// Evaluate the alert policy against every vehicle's current values.
    ///
    /// The result is returned only; the registered alert list is unchanged.
    pub fn evaluate_current_alerts(&self) -> Vec<Alert> {
        self.lock()
            .vehicles
            .iter()
            .flat_map(|vehicle| alert::evaluate(vehicle))
            .collect()
    }

    /// Number of registered vehicles
    pub fn len(&self) -> usize {
        self.lock().vehicles.len()
    }

    /// True when no vehicle has been registered
    pub fn is_empty(&self) -> bool {
        self.lock().vehicles.is_empty()
    }
}

fn mean(vehicles: &[SharedVehicle], field: fn(&Vehicle) -> f64) -> Result<f64> {
    if vehicles.is_empty() {
        return Err(FleetError::EmptyFleet);
    }
    let sum: f64 = vehicles.iter().map(|v| field(v)).sum();
    Ok(sum / vehicles.len() as f64)
}
