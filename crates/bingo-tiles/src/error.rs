//! Tile store error types.
//!
//! Persistence failures never roll back the in-memory order; they come back
//! as warnings with user-facing messages. Import failures leave the store
//! untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Snapshot persistence error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot exceeds the storage quota.
    #[error("Snapshot of {size} bytes exceeds the {quota} byte storage quota")]
    QuotaExceeded { size: usize, quota: usize },

    /// Serialization error.
    #[error("Failed to serialize tile order")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::QuotaExceeded { .. } => {
                "The tile order is too large to store; changes are kept for this session only."
                    .to_string()
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the tile order.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the tile order to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::QuotaExceeded { .. } => {
                Some("Export the tile order to a file to keep a copy.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different snapshot path.".into())
            }
        }
    }
}

/// Rejected import payload.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("import root must be an array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("import entry {index} is not a record")]
    NotARecord { index: usize },
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
