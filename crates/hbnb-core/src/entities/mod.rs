//! Entity structs for every hbnb record type.
//!
//! Each struct declares a fixed attribute set (`deny_unknown_fields`) plus the
//! shared base attributes `id`, `created_at` and `updated_at`. [`Entity`] is the
//! closed sum over all of them; its serde tag `__class__` is the discriminator
//! written into representations.

mod amenity;
mod city;
mod place;
mod review;
mod state;
mod user;

pub use amenity::Amenity;
pub use city::City;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::{ids, timestamps};

/// Any hbnb record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Entity {
    State(State),
    City(City),
    User(User),
    Place(Place),
    Review(Review),
    Amenity(Amenity),
}

/// Typed access to a concrete entity struct.
pub trait Model: Clone + Sized {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, ts: DateTime<Utc>);

    /// Stamp `updated_at` with the current time, never earlier than `created_at`.
    fn touch(&mut self) {
        let now = timestamps::now().max(self.created_at());
        self.set_updated_at(now);
    }

    /// Hook run before every persist.
    fn prepare_save(&mut self) {}

    fn into_entity(self) -> Entity;
    fn from_entity(entity: Entity) -> Option<Self>;

    fn composite_key(&self) -> String {
        ids::composite_key(Self::KIND, self.id())
    }
}

macro_rules! impl_model {
    ($ty:ident $(, prepare_save => $hook:ident)?) => {
        impl Model for $ty {
            const KIND: EntityKind = EntityKind::$ty;

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn updated_at(&self) -> DateTime<Utc> {
                self.updated_at
            }

            fn set_updated_at(&mut self, ts: DateTime<Utc>) {
                self.updated_at = ts;
            }

            $(
                fn prepare_save(&mut self) {
                    self.$hook();
                }
            )?

            fn into_entity(self) -> Entity {
                Entity::$ty(self)
            }

            fn from_entity(entity: Entity) -> Option<Self> {
                match entity {
                    Entity::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Entity {
            fn from(value: $ty) -> Self {
                Self::$ty(value)
            }
        }
    };
}

impl_model!(State);
impl_model!(City);
impl_model!(User, prepare_save => digest_password);
impl_model!(Place, prepare_save => dedup_amenities);
impl_model!(Review);
impl_model!(Amenity);

/// Dispatch an expression over the concrete model inside an `Entity`.
macro_rules! with_model {
    ($entity:expr, $m:ident => $body:expr) => {
        match $entity {
            Entity::State($m) => $body,
            Entity::City($m) => $body,
            Entity::User($m) => $body,
            Entity::Place($m) => $body,
            Entity::Review($m) => $body,
            Entity::Amenity($m) => $body,
        }
    };
}

impl Entity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::State(_) => EntityKind::State,
            Self::City(_) => EntityKind::City,
            Self::User(_) => EntityKind::User,
            Self::Place(_) => EntityKind::Place,
            Self::Review(_) => EntityKind::Review,
            Self::Amenity(_) => EntityKind::Amenity,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        with_model!(self, m => m.id())
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        with_model!(self, m => m.created_at())
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        with_model!(self, m => m.updated_at())
    }

    pub(crate) fn set_updated_at(&mut self, ts: DateTime<Utc>) {
        with_model!(self, m => m.set_updated_at(ts));
    }

    pub fn touch(&mut self) {
        with_model!(self, m => m.touch());
    }

    pub fn prepare_save(&mut self) {
        with_model!(self, m => m.prepare_save());
    }

    /// Composite lookup key, `"{Type}.{id}"`.
    #[must_use]
    pub fn composite_key(&self) -> String {
        ids::composite_key(self.kind(), self.id())
    }

    /// Downcast to a concrete model.
    #[must_use]
    pub fn into_model<T: Model>(self) -> Option<T> {
        T::from_entity(self)
    }
}
