//! # hbnb-config
//!
//! Layered configuration loading for hbnb using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HBNB_*` prefix, `__` as separator)
//! 2. Legacy environment switches (`HBNB_TYPE_STORAGE`, `HBNB_ENV`, `HBNB_MYSQL_*`)
//! 3. Project-level `./hbnb.toml`
//! 4. User-level `~/.config/hbnb/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HBNB_STORAGE__BACKEND` -> `storage.backend`,
//! `HBNB_STORAGE__DATABASE__URL` -> `storage.database.url`, etc.
//!
//! The legacy switches map as follows:
//!
//! | Variable | Key |
//! |---|---|
//! | `HBNB_TYPE_STORAGE` | `storage.backend` (`db` or `file`) |
//! | `HBNB_ENV` | `storage.environment` (`test` drops all tables at open) |
//! | `HBNB_MYSQL_HOST` | `storage.database.url` |
//! | `HBNB_MYSQL_PWD` | `storage.database.auth_token` |
//! | `HBNB_MYSQL_DB` | `storage.database.path` |
//!
//! # Usage
//!
//! ```no_run
//! use hbnb_config::HbnbConfig;
//!
//! let config = HbnbConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.storage.backend);
//! ```

mod database;
mod error;
mod file;
mod storage;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use file::FileConfig;
pub use storage::{Backend, Environment, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Legacy single-variable switches and the config keys they set.
const LEGACY_ENV: [(&str, &str); 5] = [
    ("HBNB_TYPE_STORAGE", "storage.backend"),
    ("HBNB_ENV", "storage.environment"),
    ("HBNB_MYSQL_HOST", "storage.database.url"),
    ("HBNB_MYSQL_PWD", "storage.database.auth_token"),
    ("HBNB_MYSQL_DB", "storage.database.path"),
];

/// The legacy variable that sets `key`, if any.
pub(crate) fn legacy_var(key: &str) -> Option<&'static str> {
    LEGACY_ENV
        .iter()
        .find_map(|(var, mapped)| (*mapped == key).then_some(*var))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HbnbConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl HbnbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type, and a validation error when the selected backend
    /// is missing its location or credentials.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.storage.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("hbnb.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        for (var, key) in LEGACY_ENV {
            figment = figment.merge(Env::raw().only(&[var]).map(move |_| key.into()));
        }

        figment.merge(Env::prefixed("HBNB_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hbnb").join("config.toml"))
    }
}
