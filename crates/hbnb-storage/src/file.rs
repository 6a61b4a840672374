//! JSON file engine.
//!
//! Keeps every live entity in memory, keyed by composite key (`"Type.id"`).
//! `save` writes the whole map as one JSON object to a temp file in the same
//! directory and renames it over the target, so a crash never leaves a
//! half-written file behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use hbnb_core::{Amenity, Entity, EntityKind, Model, Place, Relation, SerializationPolicy};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::engine::Engine;
use crate::error::StorageError;

/// In-memory object map flushed to a single JSON file.
pub struct FileEngine {
    path: PathBuf,
    objects: BTreeMap<String, Entity>,
}

impl FileEngine {
    /// Open the engine and load `path` if it exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read,
    /// `StorageError::Malformed` if it is not a JSON object of objects, and
    /// `StorageError::Core` if a record fails validation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let mut engine = Self {
            path: path.into(),
            objects: BTreeMap::new(),
        };
        engine.load()?;
        Ok(engine)
    }

    /// The file this engine reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> Result<(), StorageError> {
        self.objects.clear();

        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no storage file, starting empty");
                return Ok(());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let records: Map<String, Value> =
            serde_json::from_str(&text).map_err(|e| self.malformed(e.to_string()))?;

        for (key, record) in records {
            let Value::Object(map) = record else {
                return Err(self.malformed(format!("record {key} is not an object")));
            };
            let entity = Entity::from_representation(map)?;
            let actual = entity.composite_key();
            if actual != key {
                warn!(stored = %key, actual = %actual, "storage key does not match record, re-keying");
            }
            self.objects.insert(actual, entity);
        }

        info!(path = %self.path.display(), objects = self.objects.len(), "loaded storage file");
        Ok(())
    }

    fn write(&self) -> Result<(), StorageError> {
        let mut records = Map::new();
        for (key, entity) in &self.objects {
            let repr = entity.to_representation(SerializationPolicy::FILE)?;
            records.insert(key.clone(), Value::Object(repr));
        }
        let body = serde_json::to_vec(&Value::Object(records))
            .map_err(|e| StorageError::Other(e.into()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StorageError::io(&dir, e))?;
        tmp.write_all(&body)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;
        Ok(())
    }

    fn malformed(&self, reason: String) -> StorageError {
        StorageError::Malformed {
            path: self.path.clone(),
            reason,
        }
    }

    fn live(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.objects.values().filter(move |e| e.kind() == kind)
    }
}

impl Engine for FileEngine {
    fn policy(&self) -> SerializationPolicy {
        SerializationPolicy::FILE
    }

    async fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>, StorageError> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| e.kind() == k))
            .map(|(key, e)| (key.clone(), e.clone()))
            .collect())
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        let key = hbnb_core::ids::composite_key(kind, id);
        Ok(self.objects.get(&key).cloned())
    }

    async fn new(&mut self, entity: Entity) -> Result<(), StorageError> {
        let key = entity.composite_key();
        debug!(key = %key, "staged");
        self.objects.insert(key, entity);
        Ok(())
    }

    async fn delete(&mut self, kind: EntityKind, id: &str) -> Result<bool, StorageError> {
        let key = hbnb_core::ids::composite_key(kind, id);
        let removed = self.objects.remove(&key).is_some();
        if removed {
            debug!(key = %key, "staged removal");
        }
        Ok(removed)
    }

    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        Ok(match kind {
            Some(kind) => self.live(kind).count(),
            None => self.objects.len(),
        })
    }

    async fn save(&mut self) -> Result<(), StorageError> {
        self.write()?;
        info!(path = %self.path.display(), objects = self.objects.len(), "saved storage file");
        Ok(())
    }

    async fn reload(&mut self) -> Result<(), StorageError> {
        self.load()
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        self.load()
    }

    async fn children(
        &self,
        relation: Relation,
        parent_id: &str,
    ) -> Result<Vec<Entity>, StorageError> {
        Ok(self
            .live(relation.child())
            .filter(|e| relation.parent_id_of(e) == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn amenities_of(&self, place_id: &str) -> Result<Vec<Amenity>, StorageError> {
        let key = hbnb_core::ids::composite_key(EntityKind::Place, place_id);
        let Some(Entity::Place(place)) = self.objects.get(&key) else {
            return Ok(Vec::new());
        };
        Ok(place
            .amenity_ids
            .iter()
            .filter_map(|id| {
                let key = hbnb_core::ids::composite_key(EntityKind::Amenity, id);
                self.objects.get(&key).cloned()?.into_model::<Amenity>()
            })
            .collect())
    }

    async fn places_with_amenity(&self, amenity_id: &str) -> Result<Vec<Place>, StorageError> {
        Ok(self
            .live(Place::KIND)
            .filter_map(|e| match e {
                Entity::Place(place) if place.has_amenity(amenity_id) => Some(place.clone()),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{State, User};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FileEngine::open(dir.path().join("file.json")).unwrap();
        assert_eq!(engine.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_writes_composite_keys_and_discriminator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let mut engine = FileEngine::open(&path).unwrap();

        let state = State::new("California");
        engine.new(state.clone().into()).await.unwrap();
        engine.save().await.unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let record = &raw[format!("State.{}", state.id)];
        assert_eq!(record["__class__"], "State");
        assert_eq!(record["name"], "California");
        assert_eq!(record["id"], state.id.as_str());
    }

    #[tokio::test]
    async fn file_policy_keeps_password() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let mut engine = FileEngine::open(&path).unwrap();

        let user = User::new("a@b.c", "secret");
        engine.new(user.clone().into()).await.unwrap();
        engine.save().await.unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[format!("User.{}", user.id)]["password"], user.password.as_str());
    }

    #[tokio::test]
    async fn close_discards_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = FileEngine::open(dir.path().join("file.json")).unwrap();

        engine.new(State::new("Saved").into()).await.unwrap();
        engine.save().await.unwrap();
        engine.new(State::new("Unsaved").into()).await.unwrap();
        assert_eq!(engine.count(None).await.unwrap(), 2);

        engine.close().await.unwrap();
        assert_eq!(engine.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = FileEngine::open(dir.path().join("file.json")).unwrap();
        engine.new(State::new("Ohio").into()).await.unwrap();
        engine.save().await.unwrap();
        engine.save().await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["file.json".to_string()]);
    }

    #[test]
    fn mismatched_key_is_rekeyed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(
            &path,
            r#"{"State.wrong": {"__class__": "State", "id": "right", "name": "Utah"}}"#,
        )
        .unwrap();

        let engine = FileEngine::open(&path).unwrap();
        assert!(engine.objects.contains_key("State.right"));
        assert!(!engine.objects.contains_key("State.wrong"));
    }
}
