//! Typed errors for the fetch, export and configuration stages.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single page could not be fetched.
///
/// Any of these ends the page loop; records gathered before the failing page
/// are still returned to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The body was not JSON, or `data.list` had the wrong shape.
    #[error("malformed payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Payload(e.to_string())
    }
}

/// Failure while writing the export file. Always fatal for a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spreadsheet write failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Rejected filter construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_pages must be at least 1 (got {0})")]
    InvalidMaxPages(u32),

    #[error("invalid delay range ({min}, {max}): need 0 <= min <= max")]
    InvalidDelayRange { min: f64, max: f64 },
}
