use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids, timestamps};

/// A rentable place in a city, listed by a user.
///
/// `amenity_ids` is the place side of the Place↔Amenity relation. It never
/// contains duplicates; use [`Place::add_amenity`] / [`Place::remove_amenity`]
/// rather than pushing directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Place {
    #[serde(default = "ids::new_id")]
    pub id: String,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "timestamps::now", with = "timestamps::serde_format")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = timestamps::now();
        Self {
            id: ids::new_id(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Link an amenity. Returns `false` if it was already linked.
    pub fn add_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        true
    }

    /// Unlink an amenity. Returns `false` if it was not linked.
    pub fn remove_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }

    /// Drop repeated amenity ids, keeping first occurrences.
    pub(crate) fn dedup_amenities(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.amenity_ids.retain(|id| seen.insert(id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_amenity_is_idempotent() {
        let mut place = Place::new("c", "u", "Loft");
        assert!(place.add_amenity("wifi"));
        assert!(!place.add_amenity("wifi"));
        assert_eq!(place.amenity_ids, vec!["wifi".to_string()]);
    }

    #[test]
    fn remove_missing_amenity_reports_false() {
        let mut place = Place::new("c", "u", "Loft");
        assert!(!place.remove_amenity("pool"));
        place.add_amenity("pool");
        assert!(place.remove_amenity("pool"));
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut place = Place::new("c", "u", "Loft");
        place.amenity_ids = vec!["a".into(), "b".into(), "a".into()];
        place.dedup_amenities();
        assert_eq!(place.amenity_ids, vec!["a".to_string(), "b".to_string()]);
    }
}
