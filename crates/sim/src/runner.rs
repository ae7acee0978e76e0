//! Sequential and concurrent update runs
//!
//! The concurrent run hands each worker a round-robin share of the vehicles
//! on tokio's blocking pool and waits at most `plan.deadline`. Workers still
//! running at the deadline are detached and keep going; the report says how
//! many finished.

use fleetwatch_fleet::{FleetManager, SharedVehicle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::{SimError, SimResult};
use crate::plan::{apply_random_updates, UpdatePlan};
use crate::report::{RunMode, RunReport, SimulationOutcome};

/// Update every vehicle in order on the calling thread.
pub fn run_sequential(vehicles: &[SharedVehicle], plan: &UpdatePlan) -> SimResult<RunReport> {
    if vehicles.is_empty() {
        return Ok(RunReport::empty(RunMode::Sequential));
    }

    info!(vehicles = vehicles.len(), updates = plan.updates_per_vehicle, "Starting sequential run");
    let started = Instant::now();
    let mut rng = plan.rng(0);
    let mut applied = 0;
    for vehicle in vehicles {
        applied += apply_random_updates(vehicle, plan.updates_per_vehicle, &mut rng)?;
    }

    let report = RunReport {
        mode: RunMode::Sequential,
        vehicles: vehicles.len(),
        workers: 1,
        completed_workers: 1,
        updates_applied: applied,
        elapsed: started.elapsed(),
        timed_out: false,
    };
    info!(elapsed_ms = report.elapsed.as_millis() as u64, "Sequential run finished");
    Ok(report)
}

fn distribute(vehicles: &[SharedVehicle], workers: usize) -> Vec<Vec<SharedVehicle>> {
    let mut batches = vec![Vec::new(); workers];
    for (index, vehicle) in vehicles.iter().enumerate() {
        batches[index % workers].push(Arc::clone(vehicle));
    }
    batches
}

/// Update vehicles from a pool of workers, waiting up to `plan.deadline`.
pub async fn run_concurrent(vehicles: &[SharedVehicle], plan: &UpdatePlan) -> SimResult<RunReport> {
    let worker_count = plan.worker_count(vehicles.len());
    if worker_count == 0 {
        return Ok(RunReport::empty(RunMode::Concurrent));
    }

    info!(
        vehicles = vehicles.len(),
        workers = worker_count,
        updates = plan.updates_per_vehicle,
        deadline_ms = plan.deadline.as_millis() as u64,
        "Starting concurrent run"
    );
    let started = Instant::now();
    let applied = Arc::new(AtomicU64::new(0));
    let mut workers = JoinSet::new();

    for (worker, batch) in distribute(vehicles, worker_count).into_iter().enumerate() {
        let mut rng = plan.rng(worker as u64);
        let rounds = plan.updates_per_vehicle;
        let applied = Arc::clone(&applied);
        workers.spawn_blocking(move || -> SimResult<()> {
            for vehicle in &batch {
                let done = apply_random_updates(vehicle, rounds, &mut rng)?;
                applied.fetch_add(done, Ordering::Relaxed);
            }
            Ok(())
        });
    }

    let mut completed = 0;
    let waited = tokio::time::timeout(plan.deadline, async {
        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| SimError::Join(e.to_string()))??;
            completed += 1;
        }
        Ok::<(), SimError>(())
    })
    .await;

    let timed_out = match waited {
        Ok(result) => {
            result?;
            false
        }
        Err(_) => {
            warn!(completed, total = worker_count, "Deadline elapsed before all workers finished");
            workers.detach_all();
            true
        }
    };

    let report = RunReport {
        mode: RunMode::Concurrent,
        vehicles: vehicles.len(),
        workers: worker_count,
        completed_workers: completed,
        updates_applied: applied.load(Ordering::Relaxed),
        elapsed: started.elapsed(),
        timed_out,
    };
    info!(elapsed_ms = report.elapsed.as_millis() as u64, timed_out, "Concurrent run finished");
    Ok(report)
}

/// Run updates against every registered vehicle, then read the fleet averages.
///
/// Fails with the fleet's empty-fleet error when nothing is registered.
pub async fn simulate(fleet: &FleetManager, plan: &UpdatePlan, mode: RunMode) -> SimResult<SimulationOutcome> {
    let vehicles = fleet.vehicles();
    let started = Instant::now();

    let run = match mode {
        RunMode::Sequential => run_sequential(&vehicles, plan)?,
        RunMode::Concurrent => run_concurrent(&vehicles, plan).await?,
    };
    let stats = fleet.stats()?;

    Ok(SimulationOutcome {
        run,
        stats,
        elapsed: started.elapsed(),
    })
}
