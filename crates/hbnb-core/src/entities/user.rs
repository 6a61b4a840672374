use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids, password, timestamps};

/// An account. Owns the places it lists and the reviews it writes.
///
/// `password` always holds a hex digest once the user has been constructed
/// fresh or persisted; reconstructed values are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[serde(default = "ids::new_id")]
    pub id: String,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, plain_password: &str) -> Self {
        let now = timestamps::now();
        Self {
            id: ids::new_id(),
            created_at: now,
            updated_at: now,
            email: email.into(),
            password: password::ensure_digest(plain_password),
            first_name: None,
            last_name: None,
        }
    }

    /// Replace the password, storing its digest.
    pub fn set_password(&mut self, plain: &str) {
        self.password = password::digest(plain);
    }

    /// Digest a password that was assigned in plain text.
    pub(crate) fn digest_password(&mut self) {
        self.password = password::ensure_digest(&self.password);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_stores_digest() {
        let user = User::new("a@b.c", "secret");
        assert_ne!(user.password, "secret");
        assert!(password::is_digest(&user.password));
    }

    #[test]
    fn plain_assignment_is_digested_on_demand() {
        let mut user = User::new("a@b.c", "secret");
        user.password = "changed".into();
        user.digest_password();
        assert_eq!(user.password, password::digest("changed"));
    }
}
