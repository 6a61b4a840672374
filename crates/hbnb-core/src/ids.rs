//! Identifier generation and composite keys.
//!
//! Every entity carries a random UUIDv4 string id. Lookups across the whole
//! store use the composite key `"{Type}.{id}"`, e.g. `"City.1f0c…"`.

use uuid::Uuid;

use crate::enums::EntityKind;
use crate::errors::CoreError;

/// Generate a fresh, process-wide unique identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Build the composite lookup key for an entity.
#[must_use]
pub fn composite_key(kind: EntityKind, id: &str) -> String {
    format!("{kind}.{id}")
}

/// Split a composite key into its kind and id.
///
/// # Errors
///
/// Returns `CoreError::InvalidId` if the key has no `.` separator or an empty
/// id, and `CoreError::Validation` if the type prefix is unknown.
pub fn split_composite_key(key: &str) -> Result<(EntityKind, &str), CoreError> {
    let (kind, id) = key
        .split_once('.')
        .ok_or_else(|| CoreError::InvalidId(format!("'{key}' is not a composite key")))?;
    if id.is_empty() {
        return Err(CoreError::InvalidId(format!("'{key}' has an empty id")));
    }
    Ok((kind.parse()?, id))
}
