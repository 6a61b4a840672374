//! Entity kinds and their naming in each persisted form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// The closed set of entity types.
///
/// The serialized name (`"State"`, `"City"`, ...) is the `__class__`
/// discriminator in representations and the prefix of composite keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    State,
    City,
    User,
    Place,
    Review,
    Amenity,
}

impl EntityKind {
    /// Every kind, parents before children.
    pub const ALL: [Self; 6] = [
        Self::State,
        Self::City,
        Self::User,
        Self::Place,
        Self::Review,
        Self::Amenity,
    ];

    /// Discriminator and composite-key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::City => "City",
            Self::User => "User",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::Amenity => "Amenity",
        }
    }

    /// SQL table backing this kind in the relational engine.
    ///
    /// Exhaustive match: adding a kind forces a schema decision here.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::State => "states",
            Self::City => "cities",
            Self::User => "users",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::Amenity => "amenities",
        }
    }

    /// Plural name used in per-type statistics.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::State => "states",
            Self::City => "cities",
            Self::User => "users",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::Amenity => "amenities",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::validation(format!("unknown entity type '{s}'")))
    }
}
