//! Errors raised while loading or validating storage configuration.

use thiserror::Error;

use crate::storage::Backend;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be merged, or a value
    /// has the wrong shape (an unknown backend name, for instance).
    #[error("cannot load hbnb configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The selected backend has nowhere to keep its data.
    #[error("the {backend} backend needs `{key}` to be set{}", legacy_hint(.key))]
    MissingLocation { backend: Backend, key: &'static str },

    /// A remote database was selected without credentials.
    #[error("remote database `{url}` needs `storage.database.auth_token`{}", legacy_hint("storage.database.auth_token"))]
    MissingAuthToken { url: String },
}

impl ConfigError {
    /// The config key a user has to set to clear this error.
    #[must_use]
    pub const fn key(&self) -> Option<&'static str> {
        match self {
            Self::Figment(_) => None,
            Self::MissingLocation { key, .. } => Some(*key),
            Self::MissingAuthToken { .. } => Some("storage.database.auth_token"),
        }
    }
}

fn legacy_hint(key: &str) -> String {
    crate::legacy_var(key).map_or_else(String::new, |var| format!(" (or legacy `{var}`)"))
}
