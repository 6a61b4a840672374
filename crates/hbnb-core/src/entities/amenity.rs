use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids, timestamps};

/// Something a place offers (wifi, pool, ...). Linked to places many-to-many.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Amenity {
    #[serde(default = "ids::new_id")]
    pub id: String,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let now = timestamps::now();
        Self {
            id: ids::new_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}
