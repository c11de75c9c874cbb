//! Error types shared across Visage crates.
//!
//! The motion engine itself degrades gracefully instead of erroring (a
//! missing region is a synthesized leave, a degenerate mapping returns the
//! output midpoint). These variants cover the genuinely fallible outer
//! surfaces: trace file I/O, trace parsing, configuration, and CLI setup.

use std::path::PathBuf;

/// Top-level error type for Visage operations.
#[derive(Debug, thiserror::Error)]
pub enum VisageError {
    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using VisageError.
pub type VisageResult<T> = Result<T, VisageError>;

impl VisageError {
    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }
}
