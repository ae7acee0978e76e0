//! Configuration management for FleetWatch.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Where vehicle rows come from and how they are split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub path: PathBuf,
    /// Skip the first line of the source.
    pub has_header: bool,
    pub delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub updates_per_vehicle: usize,
    /// Worker thread count for the concurrent run. 0 means one per vehicle.
    pub workers: usize,
    /// How long the concurrent run waits for its workers before moving on.
    pub deadline_secs: u64,
    /// RNG seed. 0 means seed from entropy.
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("vehicles.csv"),
            has_header: true,
            delimiter: ",".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            updates_per_vehicle: 1000,
            workers: 0,
            deadline_secs: 60,
            seed: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl IngestConfig {
    /// The delimiter as a single character. Only valid after [`Config::validate`].
    pub fn delimiter_char(&self) -> Option<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Config {
    /// Load and validate a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            ingest: IngestConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Reject settings the simulation or ingest layers cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ingest.delimiter_char().is_none() {
            return Err(CoreError::Config(format!(
                "ingest.delimiter must be a single character, got {:?}",
                self.ingest.delimiter
            )));
        }
        if self.simulation.updates_per_vehicle == 0 {
            return Err(CoreError::Config(
                "simulation.updates_per_vehicle must be greater than zero".to_string(),
            ));
        }
        if self.simulation.deadline_secs == 0 {
            return Err(CoreError::Config(
                "simulation.deadline_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
