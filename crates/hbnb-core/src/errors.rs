//! Cross-cutting error types for hbnb.
//!
//! Missing entities are not errors anywhere in the system: lookups return
//! `Option` and deletes of unknown keys are no-ops. Storage-specific failures
//! live in `hbnb-storage::StorageError`.

use thiserror::Error;

/// Errors raised while constructing or reconstructing entities.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (unknown type, unknown attribute, bad value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An identifier or composite key was malformed.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// A timestamp could not be parsed from its serialized form.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
