//! Storage error types for hbnb-storage.

use std::path::PathBuf;

use hbnb_core::CoreError;
use thiserror::Error;

/// Errors from storage operations.
///
/// A missing entity is never an error: lookups return `None` and deletes
/// report zero removed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity validation failed (unknown type or attribute, bad timestamp).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database rejected the session at commit (e.g., a dangling foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The storage file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage file exists but is not a valid object map.
    #[error("Malformed storage file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A SQL query failed or returned data that does not map to an entity.
    #[error("Query failed: {0}")]
    Query(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Whether the error is a validation failure rather than a medium failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Core(
                CoreError::Validation(_)
                    | CoreError::InvalidId(_)
                    | CoreError::InvalidTimestamp { .. }
            ) | Self::Constraint(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
