//! Relational engine (libSQL) configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from("hbnb.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://hbnb-org.turso.io`). A bare host
    /// gets the `libsql://` scheme. Empty means a local database.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }

    /// Remote URL with a scheme, or `None` for a local database.
    pub fn remote_url(&self) -> Option<String> {
        if !self.is_remote() {
            return None;
        }
        if self.url.contains("://") {
            Some(self.url.clone())
        } else {
            Some(format!("libsql://{}", self.url))
        }
    }

    /// An in-memory local database (tests).
    pub fn in_memory() -> Self {
        Self {
            path: ":memory:".into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.remote_url(), None);
        assert_eq!(config.path, "hbnb.db");
    }

    #[test]
    fn bare_host_gets_scheme() {
        let config = DatabaseConfig {
            url: "hbnb-dev.turso.io".into(),
            ..Default::default()
        };
        assert_eq!(
            config.remote_url().as_deref(),
            Some("libsql://hbnb-dev.turso.io")
        );
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let config = DatabaseConfig {
            url: "http://127.0.0.1:8080".into(),
            ..Default::default()
        };
        assert_eq!(config.remote_url().as_deref(), Some("http://127.0.0.1:8080"));
    }
}
