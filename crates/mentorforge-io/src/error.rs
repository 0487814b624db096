//! Error types for reading records and writing reports.

use std::path::PathBuf;

use mentorforge_core::RecordError;
use thiserror::Error;

/// Errors that can occur reading input files or writing reports.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV itself could not be read.
    #[error("Failed to read CSV {origin}: {source}")]
    CsvRead {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// A row was read but is not a valid record.
    #[error("{origin}, row {row}: {source}")]
    Record {
        origin: String,
        row: u64,
        #[source]
        source: RecordError,
    },

    #[error("Failed to write CSV: {0}")]
    CsvWrite(#[from] csv::Error),
}

/// Result type for input and report operations.
pub type Result<T> = std::result::Result<T, IoError>;
