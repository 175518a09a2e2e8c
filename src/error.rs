// src/error.rs
//! Application error types with structured error handling.
//!
//! The taxonomy mirrors how failures are handled: input errors (missing or
//! malformed export JSON) abort the run, while per-image and per-batch
//! failures are recovered locally by the modules that encounter them and
//! never reach this type as fatal errors.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Export API returned an error status: {status}")]
    ExportService { status: reqwest::StatusCode },

    #[error("Cannot read input file {path}: {source}")]
    InputFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error for {path}: {source}")]
    JsonParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed export payload: {0}")]
    MalformedExport(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedExport(err.to_string())
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
