//! Fleet loading with skip-on-error policy
//!
//! Every row that fails shape, number or range checks is logged and recorded
//! in the [`IngestReport`], and loading carries on with the next line.

use fleetwatch_core::IngestConfig;
use fleetwatch_fleet::{FleetManager, SharedVehicle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::row::parse_row;

/// How the source is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Skip line 1
    pub has_header: bool,
    pub delimiter: char,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ',',
        }
    }
}

impl TryFrom<&IngestConfig> for IngestOptions {
    type Error = IngestError;

    fn try_from(config: &IngestConfig) -> Result<Self> {
        let delimiter = config
            .delimiter_char()
            .ok_or_else(|| IngestError::Delimiter(config.delimiter.clone()))?;
        Ok(Self {
            has_header: config.has_header,
            delimiter,
        })
    }
}

/// A row that was not registered
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based line number in the source
    pub line: usize,
    pub error: IngestError,
}

/// Outcome of a load
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Vehicles registered, in source order
    pub registered: Vec<SharedVehicle>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestReport {
    /// Lines that were skipped, in source order
    pub fn skipped_lines(&self) -> Vec<usize> {
        self.skipped.iter().map(|row| row.line).collect()
    }
}

/// Read rows from `reader` and register each valid vehicle with `fleet`.
///
/// Blank lines are ignored and rows that are not valid UTF-8 are skipped.
/// Only an I/O error stops the load.
pub fn load_reader<R: BufRead>(
    mut reader: R,
    options: &IngestOptions,
    fleet: &FleetManager,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if options.has_header && line_no == 1 {
            continue;
        }

        let parsed = match std::str::from_utf8(&buf) {
            Ok(text) if text.trim().is_empty() => {
                debug!(line = line_no, "Skipping blank line");
                continue;
            }
            Ok(text) => parse_row(line_no, text.trim_end_matches(['\r', '\n']), options.delimiter)
                .and_then(|raw| raw.into_vehicle(line_no)),
            Err(_) => Err(IngestError::Encoding { line: line_no }),
        };

        match parsed {
            Ok(vehicle) => {
                let vehicle = Arc::new(vehicle);
                fleet.register(Arc::clone(&vehicle));
                report.registered.push(vehicle);
            }
            Err(error) => {
                warn!(line = line_no, %error, "Skipping row");
                report.skipped.push(SkippedRow {
                    line: line_no,
                    error,
                });
            }
        }
    }

    info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        "Fleet ingest complete"
    );
    Ok(report)
}

/// Open `path` and load it with [`load_reader`].
pub fn load_path<P: AsRef<Path>>(
    path: P,
    options: &IngestOptions,
    fleet: &FleetManager,
) -> Result<IngestReport> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading fleet");
    let file = File::open(path)?;
    load_reader(BufReader::new(file), options, fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_options_from_config() {
        let config = IngestConfig {
            delimiter: ";".to_string(),
            has_header: false,
            ..IngestConfig::default()
        };
        let options = IngestOptions::try_from(&config).unwrap();
        assert_eq!(options.delimiter, ';');
        assert!(!options.has_header);

        let bad = IngestConfig {
            delimiter: "||".to_string(),
            ..IngestConfig::default()
        };
        assert!(matches!(
            IngestOptions::try_from(&bad),
            Err(IngestError::Delimiter(d)) if d == "||"
        ));
    }

    #[test]
    fn test_header_is_skipped() {
        let fleet = FleetManager::new();
        let input = "id,speed,temperature,fuel\nV1,80,100,50\n";
        let report = load_reader(Cursor::new(input), &IngestOptions::default(), &fleet).unwrap();

        assert_eq!(report.registered.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(fleet.len(), 1);
    }

    #[test]
    fn test_without_header_first_line_is_data() {
        let fleet = FleetManager::new();
        let options = IngestOptions {
            has_header: false,
            ..IngestOptions::default()
        };
        let report = load_reader(Cursor::new("V1,80,100,50\n"), &options, &fleet).unwrap();
        assert_eq!(report.registered.len(), 1);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let fleet = FleetManager::new();
        let input = "id,speed,temperature,fuel\n\nV1,80,100,50\n   \n";
        let report = load_reader(Cursor::new(input), &IngestOptions::default(), &fleet).unwrap();
        assert_eq!(report.registered.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_crlf_and_missing_trailing_newline() {
        let fleet = FleetManager::new();
        let input = "id,speed,temperature,fuel\r\nV1,80,100,50\r\nV2,90,100,40";
        let report = load_reader(Cursor::new(input), &IngestOptions::default(), &fleet).unwrap();
        assert_eq!(report.registered.len(), 2);
        assert_eq!(report.registered[1].fuel(), 40.0);
        assert!(report.skipped.is_empty());
    }
}
