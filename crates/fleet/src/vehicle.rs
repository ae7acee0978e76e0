//! Validated vehicle with independently synchronized telemetry fields
//!
//! Each numeric field lives in its own atomic cell. A setter validates first
//! and then performs a single store, so a field can never hold a torn or
//! out-of-range value. Fields are not updated together: reading speed and then
//! fuel may observe two different moments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{FleetError, Result};

/// Lowest accepted engine temperature (Celsius)
pub const MIN_TEMPERATURE: f64 = -50.0;
/// Highest accepted engine temperature (Celsius)
pub const MAX_TEMPERATURE: f64 = 200.0;
/// Lowest accepted fuel percentage
pub const MIN_FUEL: f64 = 0.0;
/// Highest accepted fuel percentage
pub const MAX_FUEL: f64 = 100.0;

/// Vehicle handle shared between the registry and mutators.
pub type SharedVehicle = Arc<Vehicle>;

/// f64 stored as its bit pattern.
#[derive(Debug)]
struct Gauge(AtomicU64);

impl Gauge {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

fn check_speed(speed: f64) -> Result<f64> {
    if speed.is_nan() {
        return Err(FleetError::validation("speed", "Speed must be a number"));
    }
    if speed < 0.0 {
        return Err(FleetError::validation("speed", "Speed cannot be negative"));
    }
    Ok(speed)
}

fn check_temperature(temperature: f64) -> Result<f64> {
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(FleetError::validation(
            "temperature",
            format!("Temperature out of range ({MIN_TEMPERATURE} to {MAX_TEMPERATURE}), got {temperature}"),
        ));
    }
    Ok(temperature)
}

fn check_fuel(fuel: f64) -> Result<f64> {
    if !(MIN_FUEL..=MAX_FUEL).contains(&fuel) {
        return Err(FleetError::validation(
            "fuel",
            format!("Fuel must be between {MIN_FUEL} and {MAX_FUEL}, got {fuel}"),
        ));
    }
    Ok(fuel)
}

/// A tracked vehicle.
///
/// Setters take `&self`, so a vehicle is shared through [`SharedVehicle`]
/// and mutated concurrently without going through the fleet registry.
#[derive(Debug)]
pub struct Vehicle {
    id: String,
    speed: Gauge,
    temperature: Gauge,
    fuel: Gauge,
}

impl Vehicle {
    /// Create a vehicle, validating every field.
    ///
    /// Fails with [`FleetError::Validation`] if the id is empty, speed is
    /// negative, temperature is outside `[-50, 200]` or fuel is outside
    /// `[0, 100]`. Nothing is built unless all four checks pass.
    pub fn new(id: impl Into<String>, speed: f64, temperature: f64, fuel: f64) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(FleetError::validation("id", "Vehicle id cannot be empty"));
        }

        Ok(Self {
            id,
            speed: Gauge::new(check_speed(speed)?),
            temperature: Gauge::new(check_temperature(temperature)?),
            fuel: Gauge::new(check_fuel(fuel)?),
        })
    }

    /// Create a vehicle already wrapped for sharing.
    pub fn shared(id: impl Into<String>, speed: f64, temperature: f64, fuel: f64) -> Result<SharedVehicle> {
        Self::new(id, speed, temperature, fuel).map(Arc::new)
    }

    /// Vehicle identifier, fixed at construction
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current speed
    pub fn speed(&self) -> f64 {
        self.speed.load()
    }

    /// Engine temperature in Celsius
    pub fn temperature(&self) -> f64 {
        self.temperature.load()
    }

    /// Remaining fuel percentage
    pub fn fuel(&self) -> f64 {
        self.fuel.load()
    }

    /// Replace the speed. A rejected value leaves the previous speed in place.
    pub fn set_speed(&self, speed: f64) -> Result<()> {
        self.speed.store(check_speed(speed)?);
        Ok(())
    }

    /// Replace the temperature. A rejected value leaves the previous one in place.
    pub fn set_temperature(&self, temperature: f64) -> Result<()> {
        self.temperature.store(check_temperature(temperature)?);
        Ok(())
    }

    /// Replace the fuel level. A rejected value leaves the previous one in place.
    pub fn set_fuel(&self, fuel: f64) -> Result<()> {
        self.fuel.store(check_fuel(fuel)?);
        Ok(())
    }

    /// Read all three fields, one after another.
    ///
    /// This is not a snapshot: a concurrent setter may land between reads.
    pub fn reading(&self) -> VehicleReading {
        VehicleReading {
            speed: self.speed(),
            temperature: self.temperature(),
            fuel: self.fuel(),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = self.reading();
        write!(
            f,
            "Vehicle{{id='{}', speed={}, temperature={}, fuel={}}}",
            self.id, reading.speed, reading.temperature, reading.fuel
        )
    }
}

/// Plain copy of a vehicle's field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleReading {
    /// Speed
    pub speed: f64,
    /// Engine temperature in Celsius
    pub temperature: f64,
    /// Fuel percentage
    pub fuel: f64,
}
