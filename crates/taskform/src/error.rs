//! Error types for taskform.
//!
//! Every fallible operation in the crate returns [`Result`]. Store failures are
//! logged where they happen and still returned, so callers can tell a degraded
//! (memory-only) state apart from a successful write.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::RecordId;

/// The main error type for taskform operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Reading the data file failed for a reason other than it being absent.
    #[error("failed to read records from {path}: {source}")]
    Load {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but does not hold a JSON array of records.
    #[error("malformed record file {path}: {source}")]
    Parse {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the data file failed. The in-memory collection keeps the change.
    #[error("failed to write records to {path}: {source}")]
    Persist {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No record carries the requested id.
    #[error("no record with id {id}")]
    RecordNotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    /// The newest id is `i64::MAX`, so no larger id can be allocated.
    #[error("record ids exhausted: no id greater than {max}", max = i64::MAX)]
    IdsExhausted,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for taskform operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a record-not-found error.
    #[must_use]
    pub fn not_found(id: RecordId) -> Self {
        Self::RecordNotFound { id }
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error came from writing the data file.
    ///
    /// When true, the in-memory collection and the file on disk have diverged
    /// until the next successful write.
    #[must_use]
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, Self::Persist { .. } | Self::DirectoryCreate { .. })
    }
}
