//! Row-to-entity parsing and statement helpers.
//!
//! Each kind has a fixed column list. SELECTs, upserts, and row parsing all
//! derive from it, so the three can never drift apart.

use chrono::{DateTime, Utc};
use hbnb_core::{Amenity, City, Entity, EntityKind, Place, Review, State, User, timestamps};
use libsql::Value;

use crate::error::StorageError;

/// Columns of the table backing `kind`, in table order.
#[must_use]
pub const fn columns(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::State | EntityKind::Amenity => &["id", "created_at", "updated_at", "name"],
        EntityKind::City => &["id", "created_at", "updated_at", "state_id", "name"],
        EntityKind::User => &[
            "id",
            "created_at",
            "updated_at",
            "email",
            "password",
            "first_name",
            "last_name",
        ],
        EntityKind::Place => &[
            "id",
            "created_at",
            "updated_at",
            "city_id",
            "user_id",
            "name",
            "description",
            "number_rooms",
            "number_bathrooms",
            "max_guest",
            "price_by_night",
            "latitude",
            "longitude",
        ],
        EntityKind::Review => &["id", "created_at", "updated_at", "place_id", "user_id", "text"],
    }
}

/// Comma-separated column list, optionally qualified with a table alias.
#[must_use]
pub fn select_list(kind: EntityKind, alias: Option<&str>) -> String {
    columns(kind)
        .iter()
        .map(|col| match alias {
            Some(a) => format!("{a}.{col}"),
            None => (*col).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `INSERT ... ON CONFLICT(id) DO UPDATE` for `kind`.
///
/// An upsert never deletes the existing row, so join rows cascading from it
/// survive a re-stage.
#[must_use]
pub fn upsert_sql(kind: EntityKind) -> String {
    let cols = columns(kind);
    let placeholders = (1..=cols.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let updates = cols
        .iter()
        .skip(1)
        .map(|col| format!("{col} = excluded.{col}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({list}) VALUES ({placeholders}) ON CONFLICT(id) DO UPDATE SET {updates}",
        table = kind.table(),
        list = cols.join(", "),
    )
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn opt_text(s: Option<&String>) -> Value {
    s.map_or(Value::Null, |s| text(s))
}

fn stamp(ts: &DateTime<Utc>) -> Value {
    Value::Text(timestamps::format(ts))
}

/// Parameter values for [`upsert_sql`], in column order.
#[must_use]
pub fn bind_values(entity: &Entity) -> Vec<Value> {
    let mut values = vec![
        text(entity.id()),
        stamp(&entity.created_at()),
        stamp(&entity.updated_at()),
    ];
    match entity {
        Entity::State(State { name, .. }) | Entity::Amenity(Amenity { name, .. }) => {
            values.push(text(name));
        }
        Entity::City(city) => {
            values.push(text(&city.state_id));
            values.push(text(&city.name));
        }
        Entity::User(user) => {
            values.push(text(&user.email));
            values.push(text(&user.password));
            values.push(opt_text(user.first_name.as_ref()));
            values.push(opt_text(user.last_name.as_ref()));
        }
        Entity::Place(place) => {
            values.push(text(&place.city_id));
            values.push(text(&place.user_id));
            values.push(text(&place.name));
            values.push(opt_text(place.description.as_ref()));
            values.push(Value::Integer(place.number_rooms));
            values.push(Value::Integer(place.number_bathrooms));
            values.push(Value::Integer(place.max_guest));
            values.push(Value::Integer(place.price_by_night));
            values.push(place.latitude.map_or(Value::Null, Value::Real));
            values.push(place.longitude.map_or(Value::Null, Value::Real));
        }
        Entity::Review(review) => {
            values.push(text(&review.place_id));
            values.push(text(&review.user_id));
            values.push(text(&review.text));
        }
    }
    values
}

/// Parse a TEXT timestamp column.
///
/// Accepts the representation format, RFC 3339 and `SQLite`'s
/// `datetime('now')` format.
///
/// # Errors
///
/// Returns `StorageError::Query` if the string cannot be parsed.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    timestamps::parse(s)
        .map_err(|e| StorageError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a row selected with [`select_list`] for `kind`.
///
/// Places come back with an empty `amenity_ids`; the engine fills it from
/// the join table.
///
/// # Errors
///
/// Returns `StorageError` if a column is missing, NULL where required, or
/// holds an unparseable timestamp.
pub fn row_to_entity(kind: EntityKind, row: &libsql::Row) -> Result<Entity, StorageError> {
    let id = row.get::<String>(0)?;
    let created_at = parse_timestamp(&row.get::<String>(1)?)?;
    let updated_at = parse_timestamp(&row.get::<String>(2)?)?;

    Ok(match kind {
        EntityKind::State => Entity::State(State {
            id,
            created_at,
            updated_at,
            name: row.get::<String>(3)?,
        }),
        EntityKind::Amenity => Entity::Amenity(Amenity {
            id,
            created_at,
            updated_at,
            name: row.get::<String>(3)?,
        }),
        EntityKind::City => Entity::City(City {
            id,
            created_at,
            updated_at,
            state_id: row.get::<String>(3)?,
            name: row.get::<String>(4)?,
        }),
        EntityKind::User => Entity::User(User {
            id,
            created_at,
            updated_at,
            email: row.get::<String>(3)?,
            password: row.get::<String>(4)?,
            first_name: row.get::<Option<String>>(5)?,
            last_name: row.get::<Option<String>>(6)?,
        }),
        EntityKind::Place => Entity::Place(Place {
            id,
            created_at,
            updated_at,
            city_id: row.get::<String>(3)?,
            user_id: row.get::<String>(4)?,
            name: row.get::<String>(5)?,
            description: row.get::<Option<String>>(6)?,
            number_rooms: row.get::<i64>(7)?,
            number_bathrooms: row.get::<i64>(8)?,
            max_guest: row.get::<i64>(9)?,
            price_by_night: row.get::<i64>(10)?,
            latitude: row.get::<Option<f64>>(11)?,
            longitude: row.get::<Option<f64>>(12)?,
            amenity_ids: Vec::new(),
        }),
        EntityKind::Review => Entity::Review(Review {
            id,
            created_at,
            updated_at,
            place_id: row.get::<String>(3)?,
            user_id: row.get::<String>(4)?,
            text: row.get::<String>(5)?,
        }),
    })
}

/// Detect a constraint failure (foreign key, NOT NULL, uniqueness).
///
/// Anything else (I/O, locking, network) is a medium failure.
pub fn is_constraint_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("constraint failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upsert_sql_updates_everything_but_id() {
        let sql = upsert_sql(EntityKind::City);
        assert_eq!(
            sql,
            "INSERT INTO cities (id, created_at, updated_at, state_id, name) VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(id) DO UPDATE SET created_at = excluded.created_at, \
             updated_at = excluded.updated_at, state_id = excluded.state_id, name = excluded.name"
        );
    }

    #[test]
    fn bind_values_match_column_count() {
        let entities: Vec<Entity> = vec![
            State::new("s").into(),
            City::new("s", "c").into(),
            User::new("e", "p").into(),
            Place::new("c", "u", "p").into(),
            Review::new("p", "u", "t").into(),
            Amenity::new("a").into(),
        ];
        for entity in entities {
            assert_eq!(
                bind_values(&entity).len(),
                columns(entity.kind()).len(),
                "{}",
                entity.kind()
            );
        }
    }

    #[test]
    fn select_list_qualifies_with_alias() {
        assert_eq!(
            select_list(EntityKind::Amenity, Some("a")),
            "a.id, a.created_at, a.updated_at, a.name"
        );
    }

    #[test]
    fn parse_timestamp_accepts_storage_format() {
        let ts = timestamps::now();
        assert_eq!(parse_timestamp(&timestamps::format(&ts)).unwrap(), ts);
        assert!(parse_timestamp("yesterday").is_err());
    }
}
