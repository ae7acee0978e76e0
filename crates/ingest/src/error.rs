//! Error types for vehicle ingestion.
//!
//! Row-level errors are reported as skipped rows and never stop a load.
//! Only I/O failures and bad options abort it.

use fleetwatch_fleet::FleetError;
use thiserror::Error;

/// Errors that can occur while loading vehicle rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Row does not have exactly four columns
    #[error("Invalid column count at line {line}: expected 4, found {found}")]
    ColumnCount { line: usize, found: usize },

    /// A numeric column failed to parse
    #[error("Invalid number at line {line} in column {column}: {value:?}")]
    ParseNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Row parsed but the vehicle failed validation
    #[error("Invalid data at line {line}: {source}")]
    Vehicle { line: usize, source: FleetError },

    /// Row is not valid UTF-8
    #[error("Invalid UTF-8 at line {line}")]
    Encoding { line: usize },

    /// Delimiter is not a single character
    #[error("Invalid delimiter: {0:?}")]
    Delimiter(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Line the error refers to, for row-level errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::ColumnCount { line, .. }
            | IngestError::ParseNumber { line, .. }
            | IngestError::Vehicle { line, .. }
            | IngestError::Encoding { line } => Some(*line),
            IngestError::Delimiter(_) | IngestError::Io(_) => None,
        }
    }
}

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
