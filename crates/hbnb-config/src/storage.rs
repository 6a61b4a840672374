//! Storage backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::database::DatabaseConfig;
use crate::error::ConfigError;
use crate::file::FileConfig;

/// Which storage engine backs the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory objects flushed to a JSON file.
    #[default]
    File,
    /// libSQL database.
    #[serde(alias = "relational")]
    Db,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Db => "db",
        })
    }
}

/// Deployment environment. `Test` resets the relational schema at open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "development")]
    Dev,
    Test,
    #[serde(alias = "production")]
    Prod,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub file: FileConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl StorageConfig {
    /// Whether the relational schema is dropped and recreated at open.
    pub fn is_test_mode(&self) -> bool {
        self.environment == Environment::Test
    }

    /// Check that the selected backend has what it needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingLocation` when the selected backend has no
    /// location to store data, and `ConfigError::MissingAuthToken` for a
    /// remote database without one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            Backend::File if self.file.path.as_os_str().is_empty() => {
                Err(ConfigError::MissingLocation {
                    backend: self.backend,
                    key: "storage.file.path",
                })
            }
            Backend::Db if !self.database.is_remote() && self.database.path.is_empty() => {
                Err(ConfigError::MissingLocation {
                    backend: self.backend,
                    key: "storage.database.path",
                })
            }
            Backend::Db if self.database.is_remote() && self.database.auth_token.is_empty() => {
                Err(ConfigError::MissingAuthToken {
                    url: self.database.remote_url().unwrap_or_default(),
                })
            }
            _ => Ok(()),
        }
    }
}
