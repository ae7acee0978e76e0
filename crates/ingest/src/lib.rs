//! Vehicle ingestion for FleetWatch.
//!
//! Reads delimited `id,speed,temperature,fuel` rows, validates them and
//! registers each good row with a [`fleetwatch_fleet::FleetManager`]. Bad rows
//! are skipped with a diagnostic.

pub mod error;
pub mod loader;
pub mod row;

pub use error::{IngestError, Result};
pub use loader::{load_path, load_reader, IngestOptions, IngestReport, SkippedRow};
pub use row::{parse_row, RawVehicle};
