//! The operation set every storage engine provides.

use std::collections::BTreeMap;

use hbnb_core::{Amenity, Entity, EntityKind, Place, Relation, SerializationPolicy};

use crate::db::DbEngine;
use crate::error::StorageError;
use crate::file::FileEngine;

/// A persistence backend.
///
/// `new` and `delete` stage changes that later reads observe; `save` makes
/// every staged change durable at once. Engines know nothing about cascades:
/// the [`Storage`](crate::Storage) facade computes them from [`Relation`].
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// What this engine's representations may contain.
    fn policy(&self) -> SerializationPolicy;

    /// Every live entity (of `kind`, when given) keyed by composite key.
    async fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>, StorageError>;

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError>;

    /// Stage an insert or replacement of `entity`.
    async fn new(&mut self, entity: Entity) -> Result<(), StorageError>;

    /// Stage a removal. Returns whether the entity was live.
    async fn delete(&mut self, kind: EntityKind, id: &str) -> Result<bool, StorageError>;

    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError>;

    /// Persist every staged change atomically.
    async fn save(&mut self) -> Result<(), StorageError>;

    /// Reinitialize live state from the durable medium.
    async fn reload(&mut self) -> Result<(), StorageError>;

    /// Discard unsaved changes and release the session. Safe to call repeatedly.
    async fn close(&mut self) -> Result<(), StorageError>;

    /// Children of `parent_id` along `relation`.
    async fn children(
        &self,
        relation: Relation,
        parent_id: &str,
    ) -> Result<Vec<Entity>, StorageError>;

    /// Amenities linked to a place.
    async fn amenities_of(&self, place_id: &str) -> Result<Vec<Amenity>, StorageError>;

    /// Places linking an amenity.
    async fn places_with_amenity(&self, amenity_id: &str) -> Result<Vec<Place>, StorageError>;
}

/// The engine selected by configuration.
pub enum AnyEngine {
    File(FileEngine),
    Db(DbEngine),
}

macro_rules! dispatch {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            AnyEngine::File($e) => $body,
            AnyEngine::Db($e) => $body,
        }
    };
}

impl Engine for AnyEngine {
    fn policy(&self) -> SerializationPolicy {
        dispatch!(self, e => e.policy())
    }

    async fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>, StorageError> {
        dispatch!(self, e => e.all(kind).await)
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        dispatch!(self, e => e.get(kind, id).await)
    }

    async fn new(&mut self, entity: Entity) -> Result<(), StorageError> {
        dispatch!(self, e => e.new(entity).await)
    }

    async fn delete(&mut self, kind: EntityKind, id: &str) -> Result<bool, StorageError> {
        dispatch!(self, e => e.delete(kind, id).await)
    }

    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        dispatch!(self, e => e.count(kind).await)
    }

    async fn save(&mut self) -> Result<(), StorageError> {
        dispatch!(self, e => e.save().await)
    }

    async fn reload(&mut self) -> Result<(), StorageError> {
        dispatch!(self, e => e.reload().await)
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        dispatch!(self, e => e.close().await)
    }

    async fn children(
        &self,
        relation: Relation,
        parent_id: &str,
    ) -> Result<Vec<Entity>, StorageError> {
        dispatch!(self, e => e.children(relation, parent_id).await)
    }

    async fn amenities_of(&self, place_id: &str) -> Result<Vec<Amenity>, StorageError> {
        dispatch!(self, e => e.amenities_of(place_id).await)
    }

    async fn places_with_amenity(&self, amenity_id: &str) -> Result<Vec<Place>, StorageError> {
        dispatch!(self, e => e.places_with_amenity(amenity_id).await)
    }
}
