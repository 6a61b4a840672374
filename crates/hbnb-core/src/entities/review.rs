use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids, timestamps};

/// A user's review of a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Review {
    #[serde(default = "ids::new_id")]
    pub id: String,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

impl Review {
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let now = timestamps::now();
        Self {
            id: ids::new_id(),
            created_at: now,
            updated_at: now,
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
