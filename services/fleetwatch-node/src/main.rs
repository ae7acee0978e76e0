use anyhow::{Context, Result};
use clap::Parser;
use fleetwatch_core::{logging, Config};
use fleetwatch_fleet::FleetManager;
use fleetwatch_ingest::{load_path, IngestOptions};
use fleetwatch_sim::{simulate, RunMode, SimulationOutcome, UpdatePlan};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
struct NodeVersionHandshake {
    version: &'static str,
}

/// Load a vehicle fleet, drive updates against it and report fleet statistics.
#[derive(Debug, Parser)]
#[command(name = "fleetwatch", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vehicle source, overrides `ingest.path`
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Update rounds per vehicle, overrides `simulation.updates_per_vehicle`
    #[arg(long)]
    updates: Option<usize>,

    /// Concurrent worker count (0 = one per vehicle), overrides `simulation.workers`
    #[arg(long)]
    workers: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print a version handshake and exit
    #[arg(long)]
    version_json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    vehicles: usize,
    skipped_rows: Vec<usize>,
    sequential: &'a SimulationOutcome,
    concurrent: &'a SimulationOutcome,
    alerts: &'a [String],
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version_json {
        let handshake = NodeVersionHandshake {
            version: env!("CARGO_PKG_VERSION"),
        };
        println!("{}", serde_json::to_string(&handshake)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    logging::init_from_config(&config.logging);

    let options = IngestOptions::try_from(&config.ingest)?;
    let fleet = FleetManager::new();
    let ingest = load_path(&config.ingest.path, &options, &fleet)
        .with_context(|| format!("failed to load vehicles from {}", config.ingest.path.display()))?;
    info!(vehicles = fleet.len(), skipped = ingest.skipped.len(), "Fleet ready");

    let plan = UpdatePlan::from(&config.simulation);
    let sequential = simulate(&fleet, &plan, RunMode::Sequential)
        .await
        .context("sequential run failed")?;
    let concurrent = simulate(&fleet, &plan, RunMode::Concurrent)
        .await
        .context("concurrent run failed")?;
    let alerts = fleet.alerts();

    if cli.json {
        let summary = RunSummary {
            vehicles: fleet.len(),
            skipped_rows: ingest.skipped_lines(),
            sequential: &sequential,
            concurrent: &concurrent,
            alerts: &alerts,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{sequential}");
        println!("\n{concurrent}");
        println!("\nAlerts:");
        for alert in &alerts {
            println!("{alert}");
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default_config(),
    };

    if let Some(input) = &cli.input {
        config.ingest.path = input.clone();
    }
    if let Some(updates) = cli.updates {
        config.simulation.updates_per_vehicle = updates;
    }
    if let Some(workers) = cli.workers {
        config.simulation.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "fleetwatch",
            "--input",
            "fleet.csv",
            "--updates",
            "5",
            "--workers",
            "2",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.ingest.path, PathBuf::from("fleet.csv"));
        assert_eq!(config.simulation.updates_per_vehicle, 5);
        assert_eq!(config.simulation.workers, 2);
    }

    #[test]
    fn test_zero_updates_rejected() {
        let cli = Cli::parse_from(["fleetwatch", "--updates", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_version_json_flag() {
        let cli = Cli::parse_from(["fleetwatch", "--version-json"]);
        assert!(cli.version_json);
        assert!(!cli.json);
    }

    #[test]
    fn test_version_handshake_carries_only_version() {
        let handshake = NodeVersionHandshake {
            version: env!("CARGO_PKG_VERSION"),
        };
        let value = serde_json::to_value(&handshake).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["version"], env!("CARGO_PKG_VERSION"));
    }
}
