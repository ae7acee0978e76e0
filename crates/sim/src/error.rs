//! Error types for simulation runs.

use fleetwatch_fleet::FleetError;
use thiserror::Error;

/// Errors that can occur while driving updates.
///
/// A run that outlives its deadline is not an error; see
/// [`crate::RunReport::timed_out`].
#[derive(Debug, Error)]
pub enum SimError {
    /// A setter or fleet aggregate failed
    #[error("Fleet error: {0}")]
    Fleet(#[from] FleetError),

    /// A worker panicked or was cancelled
    #[error("Worker failed: {0}")]
    Join(String),
}

/// Result type for simulation runs.
pub type SimResult<T> = Result<T, SimError>;
