//! Run and simulation reports

use fleetwatch_fleet::FleetStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How updates were scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// One thread, vehicles in order
    Sequential,
    /// Worker pool with a bounded wait
    Concurrent,
}

impl RunMode {
    /// Heading used in printed results
    pub fn title(&self) -> &'static str {
        match self {
            RunMode::Sequential => "Single-threaded",
            RunMode::Concurrent => "Multi-threaded",
        }
    }
}

/// What an update run did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub vehicles: usize,
    pub workers: usize,
    /// Workers that finished before the deadline
    pub completed_workers: usize,
    /// Update rounds applied across all vehicles when the run returned
    pub updates_applied: u64,
    pub elapsed: Duration,
    /// True when the deadline elapsed before every worker finished
    pub timed_out: bool,
}

impl RunReport {
    pub(crate) fn empty(mode: RunMode) -> Self {
        Self {
            mode,
            vehicles: 0,
            workers: 0,
            completed_workers: 0,
            updates_applied: 0,
            elapsed: Duration::ZERO,
            timed_out: false,
        }
    }
}

/// An update run followed by a read of the fleet averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub run: RunReport,
    pub stats: FleetStats,
    /// Updates plus the averages read
    pub elapsed: Duration,
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} Results ---", self.run.mode.title())?;
        writeln!(f, "Average Speed: {}", self.stats.average_speed)?;
        writeln!(f, "Average Temperature: {}", self.stats.average_temperature)?;
        writeln!(f, "Average Fuel: {}", self.stats.average_fuel)?;
        write!(f, "Time (ms): {}", self.elapsed.as_millis())?;
        if self.run.timed_out {
            write!(
                f,
                "\nDeadline elapsed: {}/{} workers finished",
                self.run.completed_workers, self.run.workers
            )?;
        }
        Ok(())
    }
}
