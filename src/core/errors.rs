//! JD-prefixed error types with structured error codes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, JdError>;

/// Top-level error type for jetdash.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum JdError {
    #[error("[JD-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[JD-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[JD-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[JD-2001] snapshot decode failure in {context}: {details}")]
    SnapshotDecode {
        context: &'static str,
        details: String,
    },

    #[error("[JD-2002] empty replay source: {path}")]
    EmptyReplay { path: PathBuf },

    #[error("[JD-3001] terminal failure during {context}: {source}")]
    Terminal {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("[JD-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JdError {
    /// Build a terminal error from an I/O failure with a short phase label.
    pub fn terminal(context: &'static str, source: io::Error) -> Self {
        Self::Terminal { context, source }
    }

    /// Build a path-tagged I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
