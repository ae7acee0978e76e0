//! Threshold policy for fleet alerts
//!
//! Temperature above [`OVERHEAT_THRESHOLD`] raises a critical overheating
//! alert and fuel below [`LOW_FUEL_THRESHOLD`] raises a low fuel warning.
//! Both comparisons are strict.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vehicle::Vehicle;

/// Temperature threshold for critical overheating alert
pub const OVERHEAT_THRESHOLD: f64 = 110.0;
/// Fuel threshold for low fuel warning
pub const LOW_FUEL_THRESHOLD: f64 = 15.0;

/// Alert categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Engine temperature above threshold
    CriticalOverheating,
    /// Fuel level below threshold
    LowFuel,
}

impl AlertKind {
    /// Message prefix, followed by the vehicle id
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::CriticalOverheating => "Critical Overheating",
            AlertKind::LowFuel => "Low Fuel Warning",
        }
    }
}

/// An alert raised for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert category
    pub kind: AlertKind,
    /// Vehicle the alert was raised for
    pub vehicle_id: String,
    /// Field value that crossed the threshold
    pub observed: f64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for Vehicle {}", self.kind.label(), self.vehicle_id)
    }
}

/// Evaluate the threshold policy against a vehicle's current values.
///
/// Temperature and fuel are each read once. Overheating comes before low fuel.
pub fn evaluate(vehicle: &Vehicle) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let temperature = vehicle.temperature();
    if temperature > OVERHEAT_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::CriticalOverheating,
            vehicle_id: vehicle.id().to_string(),
            observed: temperature,
        });
    }

    let fuel = vehicle.fuel();
    if fuel < LOW_FUEL_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::LowFuel,
            vehicle_id: vehicle.id().to_string(),
            observed: fuel,
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_messages() {
        let v = Vehicle::new("V9", 80.0, 120.0, 10.0).unwrap();
        let messages: Vec<String> = evaluate(&v).iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "Critical Overheating for Vehicle V9".to_string(),
                "Low Fuel Warning for Vehicle V9".to_string(),
            ]
        );
    }

    #[test]
    fn test_boundaries_do_not_trigger() {
        let v = Vehicle::new("V1", 80.0, OVERHEAT_THRESHOLD, LOW_FUEL_THRESHOLD).unwrap();
        assert!(evaluate(&v).is_empty());
    }

    #[test]
    fn test_observed_value_recorded() {
        let v = Vehicle::new("V1", 80.0, 150.0, 50.0).unwrap();
        let alerts = evaluate(&v);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::CriticalOverheating);
        assert_eq!(alerts[0].observed, 150.0);
    }

    #[test]
    fn test_alert_serialization() {
        let alert = Alert {
            kind: AlertKind::LowFuel,
            vehicle_id: "V2".to_string(),
            observed: 10.0,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["kind"], "LowFuel");
        assert_eq!(json["vehicle_id"], "V2");

        let back: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(back, alert);
    }
}
