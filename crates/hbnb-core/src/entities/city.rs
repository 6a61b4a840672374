use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids, timestamps};

/// A city inside a state. Owns the places listed in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct City {
    #[serde(default = "ids::new_id")]
    pub id: String,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub state_id: String,
    #[serde(default)]
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = timestamps::now();
        Self {
            id: ids::new_id(),
            created_at: now,
            updated_at: now,
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}
