//! Error types for the dirtrail consolidation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting or consolidating directory changes
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Failed to diff {before:?} against {after:?}: {reason}")]
    ExtractionFailure {
        before: PathBuf,
        after: PathBuf,
        reason: String,
    },

    #[error("Malformed diff report entry {line:?}: {reason}")]
    MalformedReportEntry { line: String, reason: String },

    #[error("Failed to remove synthetic empty directory {path:?}: {source}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiffError {
    pub(crate) fn extraction(
        before: impl Into<PathBuf>,
        after: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        DiffError::ExtractionFailure {
            before: before.into(),
            after: after.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        DiffError::MalformedReportEntry {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Application-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Diff(#[from] DiffError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render failed: {0}")]
    RenderError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
