//! Error types for fleet operations.

use thiserror::Error;

/// Errors raised by vehicles and the fleet registry.
///
/// Neither kind is retried internally. The operation that produced one has
/// no observable effect.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    /// A constructed or assigned value violates its range or non-empty rule
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Offending field name
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// An aggregate was requested from a fleet with no vehicles
    #[error("No vehicles in fleet")]
    EmptyFleet,
}

impl FleetError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        FleetError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for range and non-empty violations.
    pub fn is_validation(&self) -> bool {
        matches!(self, FleetError::Validation { .. })
    }

    /// True when an aggregate was requested on an empty fleet.
    pub fn is_empty_fleet(&self) -> bool {
        matches!(self, FleetError::EmptyFleet)
    }
}

/// Result type for fleet operations.
pub type Result<T> = std::result::Result<T, FleetError>;
