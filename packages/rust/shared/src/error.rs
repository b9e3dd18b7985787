//! Error types for SiteScout.
//!
//! Library crates use [`SiteScoutError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Per-record failures (a search that found nothing, a URL that timed out)
//! are *not* errors; they degrade to notes on the record so every input
//! row still produces an output row.

use std::path::PathBuf;

/// Top-level error type for all SiteScout operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteScoutError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Input-file error: missing file, undecodable encoding, missing column.
    /// Always fatal before the pipeline starts.
    #[error("input error: {message}")]
    Input { message: String },

    /// Network/HTTP error outside the per-record verification path.
    #[error("network error: {0}")]
    Network(String),

    /// Search provider error (bad credentials, malformed response).
    #[error("search error: {0}")]
    Search(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (empty table, malformed row, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SiteScoutError>;

impl SiteScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
