//! Update plans and random telemetry generation

use fleetwatch_core::SimulationConfig;
use fleetwatch_fleet::Vehicle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;

use crate::error::SimResult;

/// Speeds written by the simulation
pub const SPEED_RANGE: Range<f64> = 0.0..120.0;
/// Temperatures written by the simulation
pub const TEMPERATURE_RANGE: Range<f64> = 80.0..130.0;
/// Fuel levels written by the simulation
pub const FUEL_RANGE: Range<f64> = 0.0..100.0;

/// How many updates to apply and how to schedule them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Update rounds per vehicle; each round sets speed, temperature and fuel
    pub updates_per_vehicle: usize,
    /// Worker count for concurrent runs, 0 for one per vehicle
    pub workers: usize,
    /// Bounded wait for concurrent runs
    pub deadline: Duration,
    /// 0 seeds from entropy
    pub seed: u64,
}

impl Default for UpdatePlan {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for UpdatePlan {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            updates_per_vehicle: config.updates_per_vehicle,
            workers: config.workers,
            deadline: Duration::from_secs(config.deadline_secs),
            seed: config.seed,
        }
    }
}

impl UpdatePlan {
    /// Workers actually used for `vehicles` vehicles.
    pub fn worker_count(&self, vehicles: usize) -> usize {
        match self.workers {
            0 => vehicles,
            n => n.min(vehicles),
        }
    }

    /// RNG for one stream of updates. Seeded plans give each stream its own
    /// deterministic sequence.
    pub fn rng(&self, stream: u64) -> StdRng {
        if self.seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(self.seed.wrapping_add(stream))
        }
    }
}

/// Apply `rounds` random updates to one vehicle and return how many were applied.
pub fn apply_random_updates<R: Rng>(vehicle: &Vehicle, rounds: usize, rng: &mut R) -> SimResult<u64> {
    for _ in 0..rounds {
        vehicle.set_speed(rng.gen_range(SPEED_RANGE))?;
        vehicle.set_temperature(rng.gen_range(TEMPERATURE_RANGE))?;
        vehicle.set_fuel(rng.gen_range(FUEL_RANGE))?;
    }
    Ok(rounds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_config() {
        let config = SimulationConfig {
            updates_per_vehicle: 10,
            workers: 3,
            deadline_secs: 5,
            seed: 42,
        };
        let plan = UpdatePlan::from(&config);
        assert_eq!(plan.deadline, Duration::from_secs(5));
        assert_eq!(plan.workers, 3);
        assert_eq!(UpdatePlan::default().updates_per_vehicle, 1000);
    }

    #[test]
    fn test_worker_count() {
        let plan = UpdatePlan { workers: 0, ..UpdatePlan::default() };
        assert_eq!(plan.worker_count(7), 7);
        assert_eq!(plan.worker_count(0), 0);

        let plan = UpdatePlan { workers: 4, ..UpdatePlan::default() };
        assert_eq!(plan.worker_count(10), 4);
        assert_eq!(plan.worker_count(2), 2);
    }

    #[test]
    fn test_random_updates_stay_in_ranges() {
        let vehicle = Vehicle::new("V1", 0.0, 0.0, 0.0).unwrap();
        let plan = UpdatePlan { seed: 7, ..UpdatePlan::default() };
        let mut rng = plan.rng(0);

        for _ in 0..200 {
            assert_eq!(apply_random_updates(&vehicle, 1, &mut rng).unwrap(), 1);
            assert!(SPEED_RANGE.contains(&vehicle.speed()));
            assert!(TEMPERATURE_RANGE.contains(&vehicle.temperature()));
            assert!(FUEL_RANGE.contains(&vehicle.fuel()));
        }
    }

    #[test]
    fn test_seeded_streams_are_deterministic() {
        let plan = UpdatePlan { seed: 99, ..UpdatePlan::default() };
        let a = Vehicle::new("A", 0.0, 0.0, 0.0).unwrap();
        let b = Vehicle::new("B", 0.0, 0.0, 0.0).unwrap();

        apply_random_updates(&a, 25, &mut plan.rng(3)).unwrap();
        apply_random_updates(&b, 25, &mut plan.rng(3)).unwrap();
        assert_eq!(a.reading(), b.reading());
    }
}
