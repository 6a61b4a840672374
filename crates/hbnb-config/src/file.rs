//! File engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> PathBuf {
    PathBuf::from("file.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    /// JSON file holding every persisted object.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
