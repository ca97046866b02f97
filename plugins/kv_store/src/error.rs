//! Error types for store operations

use crate::cast::ValueType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing, casting or loading stores
#[derive(Debug, Error)]
pub enum KvError {
    /// Malformed store text or an unknown format specifier
    #[error("{0}")]
    Format(String),

    /// A named registry file does not exist
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A value cannot be read as the requested type
    #[error("cannot cast {value:?} to {target}")]
    Cast { value: String, target: ValueType },

    /// A request is missing required arguments
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Reading or writing a file failed
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KvError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for store operations
pub type Result<T> = std::result::Result<T, KvError>;
