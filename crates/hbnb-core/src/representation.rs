//! Serialized representation of entities.
//!
//! A representation is a flat JSON object holding every attribute of the
//! entity, its timestamps as `%Y-%m-%dT%H:%M:%S%.6f` strings, and the
//! `__class__` discriminator:
//!
//! ```json
//! {"__class__": "City", "id": "…", "created_at": "2017-03-25T02:17:06.000000",
//!  "updated_at": "2017-03-25T02:17:06.000000", "state_id": "…", "name": "Akron"}
//! ```
//!
//! Reconstruction goes through a static discriminator → type mapping. Unknown
//! discriminators and attributes are rejected as validation errors.

use serde_json::{Map, Value};

use crate::entities::Entity;
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// Name of the discriminator attribute.
pub const CLASS_FIELD: &str = "__class__";

/// Per-backend rules for what a representation may contain.
///
/// The file engine emits user passwords (its persisted file must reload
/// users intact). The relational engine keeps passwords in its own column and
/// leaves them out of every representation it hands to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializationPolicy {
    pub include_password: bool,
}

impl SerializationPolicy {
    pub const FILE: Self = Self {
        include_password: true,
    };

    pub const RELATIONAL: Self = Self {
        include_password: false,
    };
}

impl Default for SerializationPolicy {
    fn default() -> Self {
        Self::FILE
    }
}

impl Entity {
    /// Serialize into a representation under the given policy.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if serialization fails.
    pub fn to_representation(
        &self,
        policy: SerializationPolicy,
    ) -> Result<Map<String, Value>, CoreError> {
        let value = serde_json::to_value(self).map_err(|e| CoreError::Other(e.into()))?;
        let Value::Object(mut map) = value else {
            return Err(CoreError::validation(format!(
                "{} did not serialize to an object",
                self.kind()
            )));
        };
        if !policy.include_password {
            map.remove("password");
        }
        Ok(map)
    }

    /// Reconstruct an entity from its representation.
    ///
    /// Every provided attribute is assigned verbatim. A missing `id` gets a
    /// fresh one; missing timestamps are set to now (equal to each other when
    /// both are missing). An `updated_at` earlier than `created_at` is raised
    /// to `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a missing or unknown discriminator,
    /// unknown attributes, ill-typed values or unparseable timestamps.
    pub fn from_representation(map: Map<String, Value>) -> Result<Self, CoreError> {
        let kind: EntityKind = match map.get(CLASS_FIELD) {
            Some(Value::String(class)) => class.parse()?,
            Some(other) => {
                return Err(CoreError::validation(format!(
                    "{CLASS_FIELD} must be a string, got {other}"
                )));
            }
            None => return Err(CoreError::validation(format!("missing {CLASS_FIELD}"))),
        };
        let stamped = map.contains_key("created_at") || map.contains_key("updated_at");

        let mut entity: Self = serde_json::from_value(Value::Object(map))
            .map_err(|e| CoreError::validation(format!("{kind}: {e}")))?;

        if !stamped || entity.updated_at() < entity.created_at() {
            let created = entity.created_at();
            entity.set_updated_at(created);
        }
        Ok(entity)
    }

    /// Reconstruct an entity of `kind` from bare attributes (no discriminator).
    ///
    /// # Errors
    ///
    /// Same as [`Entity::from_representation`]; a conflicting `__class__`
    /// attribute is a validation error.
    pub fn from_attributes(
        kind: EntityKind,
        mut attributes: Map<String, Value>,
    ) -> Result<Self, CoreError> {
        match attributes.get(CLASS_FIELD) {
            Some(Value::String(class)) if class == kind.as_str() => {}
            Some(other) => {
                return Err(CoreError::validation(format!(
                    "{CLASS_FIELD} {other} conflicts with {kind}"
                )));
            }
            None => {
                attributes.insert(CLASS_FIELD.to_string(), Value::String(kind.to_string()));
            }
        }
        Self::from_representation(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Place, State, User};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn representation_carries_discriminator_and_string_timestamps() {
        let state: Entity = State::new("California").into();
        let map = state.to_representation(SerializationPolicy::FILE).unwrap();
        assert_eq!(map[CLASS_FIELD], json!("State"));
        assert_eq!(map["name"], json!("California"));
        assert!(map["created_at"].is_string());
        assert!(map["updated_at"].is_string());
    }

    #[test]
    fn relational_policy_drops_password() {
        let user: Entity = User::new("a@b.c", "pwd").into();
        let file = user.to_representation(SerializationPolicy::FILE).unwrap();
        let relational = user
            .to_representation(SerializationPolicy::RELATIONAL)
            .unwrap();
        assert!(file.contains_key("password"));
        assert!(!relational.contains_key("password"));
    }

    #[test]
    fn reconstruct_legacy_record() {
        let map = object(json!({
            "__class__": "City",
            "id": "521a55f4-7d82-47d9-b54c-a76916479545",
            "created_at": "2017-03-25T02:17:06",
            "updated_at": "2017-03-25T02:17:06.000000",
            "state_id": "421a55f4-7d82-47d9-b54c-a76916479545",
            "name": "Akron"
        }));
        let Entity::City(city) = Entity::from_representation(map).unwrap() else {
            panic!("expected a City");
        };
        assert_eq!(city.id, "521a55f4-7d82-47d9-b54c-a76916479545");
        assert_eq!(city.name, "Akron");
        assert_eq!(city.created_at, city.updated_at);
    }

    #[test]
    fn missing_id_and_timestamps_are_assigned() {
        let entity =
            Entity::from_attributes(EntityKind::Amenity, object(json!({"name": "Wifi"}))).unwrap();
        assert_eq!(entity.id().len(), 36);
        assert_eq!(entity.created_at(), entity.updated_at());
    }

    #[test]
    fn updated_before_created_is_clamped() {
        let map = object(json!({
            "__class__": "State",
            "created_at": "2020-01-02T00:00:00.000000",
            "updated_at": "2020-01-01T00:00:00.000000",
            "name": "Ohio"
        }));
        let entity = Entity::from_representation(map).unwrap();
        assert_eq!(entity.updated_at(), entity.created_at());
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let map = object(json!({"__class__": "State", "name": "Ohio", "flag": "red"}));
        assert!(matches!(
            Entity::from_representation(map),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        let map = object(json!({"__class__": "BaseModel", "id": "1"}));
        assert!(matches!(
            Entity::from_representation(map),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn missing_discriminator_is_rejected() {
        let map = object(json!({"id": "1"}));
        assert!(matches!(
            Entity::from_representation(map),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn bad_timestamp_is_reported() {
        let map = object(json!({"__class__": "State", "created_at": "soon"}));
        let err = Entity::from_representation(map).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn conflicting_class_attribute_is_rejected() {
        let attrs = object(json!({"__class__": "City", "name": "x"}));
        assert!(Entity::from_attributes(EntityKind::State, attrs).is_err());
    }

    #[test]
    fn place_amenities_roundtrip() {
        let mut place = Place::new("c", "u", "Loft");
        place.add_amenity("a1");
        place.latitude = Some(37.77);
        let entity: Entity = place.into();
        let map = entity.to_representation(SerializationPolicy::FILE).unwrap();
        assert_eq!(Entity::from_representation(map).unwrap(), entity);
    }
}
