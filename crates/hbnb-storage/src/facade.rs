//! The storage facade.
//!
//! Callers talk to [`Storage`] only. It forwards the uniform operation set to
//! whichever engine configuration selected, and owns everything both engines
//! must agree on: cascade deletes, relationship traversal, amenity linking,
//! and result ordering.

use std::collections::{BTreeMap, HashSet};

use hbnb_config::{Backend, StorageConfig};
use hbnb_core::{
    Amenity, City, Entity, EntityKind, Model, Place, Relation, Review, SerializationPolicy,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::db::DbEngine;
use crate::engine::{AnyEngine, Engine};
use crate::error::StorageError;
use crate::file::FileEngine;

/// Result of [`Storage::link_amenity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was staged.
    Linked,
    /// The place already linked the amenity; nothing changed.
    AlreadyLinked,
    /// The place or the amenity does not exist.
    NotFound(EntityKind),
}

/// Result of [`Storage::unlink_amenity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkOutcome {
    /// The unlink was staged.
    Unlinked,
    /// The place does not link the amenity.
    NotLinked,
    /// The place or the amenity does not exist.
    NotFound(EntityKind),
}

/// Filters for [`Storage::search_places`].
///
/// A state matches every place in its cities. State and city matches are
/// unioned; with neither given every place is a candidate. A place must link
/// every listed amenity. Unknown ids match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaceSearch {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub amenities: Vec<String>,
}

impl PlaceSearch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.amenities.is_empty()
    }
}

/// Uniform access to hbnb entities, whatever the backend.
pub struct Storage {
    engine: AnyEngine,
}

impl From<FileEngine> for Storage {
    fn from(engine: FileEngine) -> Self {
        Self {
            engine: AnyEngine::File(engine),
        }
    }
}

impl From<DbEngine> for Storage {
    fn from(engine: DbEngine) -> Self {
        Self {
            engine: AnyEngine::Db(engine),
        }
    }
}

fn sort_models<T: Model>(models: &mut [T]) {
    models.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

fn into_sorted<T: Model>(entities: impl IntoIterator<Item = Entity>) -> Vec<T> {
    let mut models: Vec<T> = entities.into_iter().filter_map(Entity::into_model).collect();
    sort_models(&mut models);
    models
}

impl Storage {
    /// Open the engine selected by `config` and load its durable state.
    ///
    /// # Errors
    ///
    /// A malformed storage file, an unreachable database or a failed schema
    /// creation is fatal and returned as `StorageError`.
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let storage: Self = match config.backend {
            Backend::File => FileEngine::open(&config.file.path)?.into(),
            Backend::Db => DbEngine::open(&config.database, config.is_test_mode())
                .await?
                .into(),
        };
        info!(backend = %config.backend, "storage ready");
        Ok(storage)
    }

    /// Which backend is active.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self.engine {
            AnyEngine::File(_) => Backend::File,
            AnyEngine::Db(_) => Backend::Db,
        }
    }

    /// The active engine's serialization policy.
    #[must_use]
    pub fn policy(&self) -> SerializationPolicy {
        self.engine.policy()
    }

    /// Serialize `entity` under the active engine's policy.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Core` if serialization fails.
    pub fn to_representation(&self, entity: &Entity) -> Result<Map<String, Value>, StorageError> {
        Ok(entity.to_representation(self.policy())?)
    }

    // -- Uniform operations ---------------------------------------------------

    /// Every live entity (of `kind`, when given) keyed by composite key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn all(
        &self,
        kind: Option<EntityKind>,
    ) -> Result<BTreeMap<String, Entity>, StorageError> {
        self.engine.all(kind).await
    }

    /// Look up one entity. A missing id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        self.engine.get(kind, id).await
    }

    /// Stage `entity` for the next [`save`](Self::save).
    ///
    /// Runs the type's pre-save hook first, so a place never reaches an
    /// engine with a repeated amenity and a plain password is digested.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine rejects the write. A rejected
    /// write leaves the staged changes as they were.
    pub async fn new(&mut self, entity: impl Into<Entity>) -> Result<(), StorageError> {
        let mut entity = entity.into();
        entity.prepare_save();
        self.engine.new(entity).await
    }

    /// Persist every staged change at once.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Constraint` when the database rejects the
    /// session (nothing is persisted), or a medium error.
    pub async fn save(&mut self) -> Result<(), StorageError> {
        self.engine.save().await
    }

    /// Stage removal of an entity and everything it owns.
    ///
    /// Ownership follows [`Relation`]: State → City → Place → Review, and
    /// User → Place, User → Review. Deleting an amenity unlinks it from every
    /// place first. Returns how many entities were removed; an unknown id
    /// removes nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine fails mid-cascade.
    pub async fn delete(&mut self, kind: EntityKind, id: &str) -> Result<usize, StorageError> {
        let Some(root) = self.engine.get(kind, id).await? else {
            return Ok(0);
        };

        if kind == EntityKind::Amenity {
            for mut place in self.engine.places_with_amenity(id).await? {
                place.remove_amenity(id);
                place.touch();
                self.engine.new(place.into()).await?;
            }
        }

        let doomed = self.collect_cascade(root).await?;
        let mut removed = 0;
        for (kind, id) in doomed.iter().rev() {
            if self.engine.delete(*kind, id).await? {
                removed += 1;
            }
        }
        info!(kind = %kind, id, removed, "cascade delete staged");
        Ok(removed)
    }

    /// The root followed by every transitive dependent, parents before children.
    async fn collect_cascade(
        &self,
        root: Entity,
    ) -> Result<Vec<(EntityKind, String)>, StorageError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(entity) = stack.pop() {
            if !seen.insert(entity.composite_key()) {
                continue;
            }
            for relation in Relation::owned_by(entity.kind()) {
                for child in self.engine.children(relation, entity.id()).await? {
                    if !seen.contains(&child.composite_key()) {
                        stack.push(child);
                    }
                }
            }
            order.push((entity.kind(), entity.id().to_string()));
        }
        Ok(order)
    }

    /// Count live entities, of `kind` when given.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        self.engine.count(kind).await
    }

    /// Reinitialize from the durable medium, discarding unsaved changes.
    ///
    /// # Errors
    ///
    /// A malformed file or failed schema creation is returned as `StorageError`.
    pub async fn reload(&mut self) -> Result<(), StorageError> {
        self.engine.reload().await
    }

    /// Discard unsaved changes and release the session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be reset.
    pub async fn close(&mut self) -> Result<(), StorageError> {
        self.engine.close().await
    }

    /// Live entity count per plural type name (`"states"`, `"places"`, ...).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn stats(&self) -> Result<BTreeMap<&'static str, usize>, StorageError> {
        let mut stats = BTreeMap::new();
        for kind in EntityKind::ALL {
            stats.insert(kind.plural(), self.engine.count(Some(kind)).await?);
        }
        Ok(stats)
    }

    // -- Typed helpers ----------------------------------------------------------

    /// Typed [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn get_as<T: Model>(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(self.engine.get(T::KIND, id).await?.and_then(Entity::into_model))
    }

    /// Every live `T`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn all_of<T: Model>(&self) -> Result<Vec<T>, StorageError> {
        Ok(into_sorted(self.engine.all(Some(T::KIND)).await?.into_values()))
    }

    /// Stamp `model`, stage it and save.
    ///
    /// Runs the type's pre-save hook (password digesting, amenity dedup),
    /// refreshes `updated_at`, then persists every staged change.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub async fn persist<T: Model>(&mut self, model: &mut T) -> Result<(), StorageError> {
        model.prepare_save();
        model.touch();
        self.engine.new(model.clone().into_entity()).await?;
        self.engine.save().await
    }

    /// Typed [`delete`](Self::delete).
    ///
    /// # Errors
    ///
    /// Same as [`delete`](Self::delete).
    pub async fn remove<T: Model>(&mut self, model: &T) -> Result<usize, StorageError> {
        self.delete(T::KIND, model.id()).await
    }

    // -- Relationships ----------------------------------------------------------

    async fn children_of<T: Model>(
        &self,
        relation: Relation,
        parent_id: &str,
    ) -> Result<Vec<T>, StorageError> {
        Ok(into_sorted(self.engine.children(relation, parent_id).await?))
    }

    /// Cities of a state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn cities_of(&self, state_id: &str) -> Result<Vec<City>, StorageError> {
        self.children_of(Relation::StateCities, state_id).await
    }

    /// Places in a city.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, StorageError> {
        self.children_of(Relation::CityPlaces, city_id).await
    }

    /// Places listed by a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn places_of_user(&self, user_id: &str) -> Result<Vec<Place>, StorageError> {
        self.children_of(Relation::UserPlaces, user_id).await
    }

    /// Reviews of a place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>, StorageError> {
        self.children_of(Relation::PlaceReviews, place_id).await
    }

    /// Reviews written by a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn reviews_of_user(&self, user_id: &str) -> Result<Vec<Review>, StorageError> {
        self.children_of(Relation::UserReviews, user_id).await
    }

    /// Amenities linked to a place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn amenities_of(&self, place_id: &str) -> Result<Vec<Amenity>, StorageError> {
        let mut amenities = self.engine.amenities_of(place_id).await?;
        sort_models(&mut amenities);
        Ok(amenities)
    }

    /// Places linking an amenity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn places_with_amenity(&self, amenity_id: &str) -> Result<Vec<Place>, StorageError> {
        let mut places = self.engine.places_with_amenity(amenity_id).await?;
        sort_models(&mut places);
        Ok(places)
    }

    /// Places matching `search`, oldest first, each at most once.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine cannot be read.
    pub async fn search_places(&self, search: &PlaceSearch) -> Result<Vec<Place>, StorageError> {
        let mut candidates: BTreeMap<String, Place> = BTreeMap::new();
        if search.states.is_empty() && search.cities.is_empty() {
            for place in self.all_of::<Place>().await? {
                candidates.insert(place.id.clone(), place);
            }
        } else {
            let mut city_ids: Vec<String> = Vec::new();
            for state_id in &search.states {
                city_ids.extend(self.cities_of(state_id).await?.into_iter().map(|c| c.id));
            }
            city_ids.extend(search.cities.iter().cloned());

            let mut visited = HashSet::new();
            for city_id in city_ids {
                if !visited.insert(city_id.clone()) {
                    continue;
                }
                for place in self.places_of_city(&city_id).await? {
                    candidates.insert(place.id.clone(), place);
                }
            }
        }

        let mut places = Vec::with_capacity(candidates.len());
        for place in candidates.into_values() {
            if !search.amenities.is_empty() {
                let linked: HashSet<String> = self
                    .engine
                    .amenities_of(&place.id)
                    .await?
                    .into_iter()
                    .map(|a| a.id)
                    .collect();
                if !search.amenities.iter().all(|id| linked.contains(id)) {
                    continue;
                }
            }
            places.push(place);
        }
        sort_models(&mut places);
        debug!(matched = places.len(), "place search");
        Ok(places)
    }

    /// Stage a Place↔Amenity link. Linking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine fails; missing entities are
    /// reported through [`LinkOutcome::NotFound`].
    pub async fn link_amenity(
        &mut self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<LinkOutcome, StorageError> {
        let Some(mut place) = self.get_as::<Place>(place_id).await? else {
            return Ok(LinkOutcome::NotFound(EntityKind::Place));
        };
        if self.engine.get(EntityKind::Amenity, amenity_id).await?.is_none() {
            return Ok(LinkOutcome::NotFound(EntityKind::Amenity));
        }
        if !place.add_amenity(amenity_id) {
            return Ok(LinkOutcome::AlreadyLinked);
        }
        place.touch();
        self.engine.new(place.into()).await?;
        debug!(place_id, amenity_id, "amenity linked");
        Ok(LinkOutcome::Linked)
    }

    /// Stage removal of a Place↔Amenity link.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the engine fails; missing entities and
    /// missing links are reported through [`UnlinkOutcome`].
    pub async fn unlink_amenity(
        &mut self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<UnlinkOutcome, StorageError> {
        let Some(mut place) = self.get_as::<Place>(place_id).await? else {
            return Ok(UnlinkOutcome::NotFound(EntityKind::Place));
        };
        if self.engine.get(EntityKind::Amenity, amenity_id).await?.is_none() {
            return Ok(UnlinkOutcome::NotFound(EntityKind::Amenity));
        }
        if !place.remove_amenity(amenity_id) {
            return Ok(UnlinkOutcome::NotLinked);
        }
        place.touch();
        self.engine.new(place.into()).await?;
        debug!(place_id, amenity_id, "amenity unlinked");
        Ok(UnlinkOutcome::Unlinked)
    }
}
