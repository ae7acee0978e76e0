//! Update driver for FleetWatch fleets.
//!
//! Applies random telemetry updates to registered vehicles, either on one
//! thread or from a worker pool with a bounded wait, and reports timing
//! together with the fleet averages read afterwards.

pub mod error;
pub mod plan;
pub mod report;
pub mod runner;

pub use error::{SimError, SimResult};
pub use plan::{apply_random_updates, UpdatePlan};
pub use report::{RunMode, RunReport, SimulationOutcome};
pub use runner::{run_concurrent, run_sequential, simulate};
