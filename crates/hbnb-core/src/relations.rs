//! One-to-many ownership relations between entity kinds.
//!
//! Every relation cascades: removing the parent removes the children. The
//! chain State → City → Place → Review and User → Place/Review is walked
//! transitively by the storage facade.
//!
//! ```text
//! State ──< City ──< Place ──< Review
//!                      ^          ^
//! User ────────────────┴──────────┘
//! ```
//!
//! The Place↔Amenity relation is many-to-many and non-owning; it lives on
//! `Place::amenity_ids`.

use crate::entities::Entity;
use crate::enums::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    StateCities,
    CityPlaces,
    UserPlaces,
    PlaceReviews,
    UserReviews,
}

impl Relation {
    pub const ALL: [Self; 5] = [
        Self::StateCities,
        Self::CityPlaces,
        Self::UserPlaces,
        Self::PlaceReviews,
        Self::UserReviews,
    ];

    #[must_use]
    pub const fn parent(self) -> EntityKind {
        match self {
            Self::StateCities => EntityKind::State,
            Self::CityPlaces => EntityKind::City,
            Self::UserPlaces | Self::UserReviews => EntityKind::User,
            Self::PlaceReviews => EntityKind::Place,
        }
    }

    #[must_use]
    pub const fn child(self) -> EntityKind {
        match self {
            Self::StateCities => EntityKind::City,
            Self::CityPlaces | Self::UserPlaces => EntityKind::Place,
            Self::PlaceReviews | Self::UserReviews => EntityKind::Review,
        }
    }

    /// Foreign-key attribute (and column) on the child.
    #[must_use]
    pub const fn foreign_key(self) -> &'static str {
        match self {
            Self::StateCities => "state_id",
            Self::CityPlaces => "city_id",
            Self::UserPlaces | Self::UserReviews => "user_id",
            Self::PlaceReviews => "place_id",
        }
    }

    /// The parent id held by `child`, or `None` if `child` is not this
    /// relation's child kind.
    #[must_use]
    pub fn parent_id_of(self, child: &Entity) -> Option<&str> {
        match (self, child) {
            (Self::StateCities, Entity::City(city)) => Some(&city.state_id),
            (Self::CityPlaces, Entity::Place(place)) => Some(&place.city_id),
            (Self::UserPlaces, Entity::Place(place)) => Some(&place.user_id),
            (Self::PlaceReviews, Entity::Review(review)) => Some(&review.place_id),
            (Self::UserReviews, Entity::Review(review)) => Some(&review.user_id),
            _ => None,
        }
    }

    /// Relations in which `parent` is the owning side.
    pub fn owned_by(parent: EntityKind) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |rel| rel.parent() == parent)
    }
}
