//! libSQL engine.
//!
//! Holds a single connection. A *session* is an open transaction on it:
//! the first staged write issues `BEGIN`, every later read on the connection
//! observes the staged rows, and `save` commits. Foreign keys are deferred to
//! `COMMIT`, so a dangling reference rolls the whole session back and
//! surfaces as [`StorageError::Constraint`].

pub mod helpers;
mod migrations;

use std::collections::{BTreeMap, HashMap};

use hbnb_config::DatabaseConfig;
use hbnb_core::{Amenity, Entity, EntityKind, Model, Place, Relation, SerializationPolicy};
use libsql::Builder;
use tracing::{debug, info, warn};

use crate::engine::Engine;
use crate::error::StorageError;
use helpers::{bind_values, is_constraint_violation, row_to_entity, select_list, upsert_sql};

/// Relational engine over a local or remote libSQL database.
pub struct DbEngine {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    in_session: bool,
}

impl DbEngine {
    /// Open the database described by `config`.
    ///
    /// With `test_mode`, every table is dropped before the schema is created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database cannot be opened or the schema
    /// cannot be created.
    pub async fn open(config: &DatabaseConfig, test_mode: bool) -> Result<Self, StorageError> {
        match config.remote_url() {
            Some(url) => Self::open_remote(&url, &config.auth_token, test_mode).await,
            None => Self::open_local(&config.path, test_mode).await,
        }
    }

    /// Open a local database file, or `:memory:`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database cannot be opened or migrations fail.
    pub async fn open_local(path: &str, test_mode: bool) -> Result<Self, StorageError> {
        let db = Builder::new_local(path).build().await?;
        info!(path, "opened local database");
        Self::from_database(db, test_mode).await
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the connection fails or migrations fail.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        test_mode: bool,
    ) -> Result<Self, StorageError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        info!(url, "opened remote database");
        Self::from_database(db, test_mode).await
    }

    async fn from_database(db: libsql::Database, test_mode: bool) -> Result<Self, StorageError> {
        let conn = db.connect()?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StorageError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let engine = Self {
            db,
            conn,
            in_session: false,
        };
        if test_mode {
            engine.drop_all().await?;
        }
        engine.run_migrations().await?;
        Ok(engine)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether staged changes are waiting for `save`.
    #[must_use]
    pub const fn in_session(&self) -> bool {
        self.in_session
    }

    async fn begin(&mut self) -> Result<(), StorageError> {
        if !self.in_session {
            self.conn.execute("BEGIN", ()).await?;
            self.in_session = true;
            debug!("session opened");
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StorageError> {
        if self.in_session {
            self.conn.execute("ROLLBACK", ()).await?;
            self.in_session = false;
            debug!("session rolled back");
        }
        Ok(())
    }

    async fn query_entities(
        &self,
        kind: EntityKind,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Entity>, StorageError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row_to_entity(kind, &row)?);
        }
        if kind == EntityKind::Place {
            self.attach_amenities(&mut out).await?;
        }
        Ok(out)
    }

    /// Fill `amenity_ids` on every place in `entities` from the join table.
    async fn attach_amenities(&self, entities: &mut [Entity]) -> Result<(), StorageError> {
        let mut links: HashMap<String, Vec<String>> = HashMap::new();
        match &*entities {
            [] => return Ok(()),
            [Entity::Place(place)] => {
                let mut rows = self
                    .conn
                    .query(
                        "SELECT amenity_id FROM place_amenity WHERE place_id = ?1 ORDER BY position",
                        [place.id.as_str()],
                    )
                    .await?;
                while let Some(row) = rows.next().await? {
                    links
                        .entry(place.id.clone())
                        .or_default()
                        .push(row.get::<String>(0)?);
                }
            }
            _ => {
                let mut rows = self
                    .conn
                    .query(
                        "SELECT place_id, amenity_id FROM place_amenity ORDER BY place_id, position",
                        (),
                    )
                    .await?;
                while let Some(row) = rows.next().await? {
                    links
                        .entry(row.get::<String>(0)?)
                        .or_default()
                        .push(row.get::<String>(1)?);
                }
            }
        }

        for entity in entities.iter_mut() {
            if let Entity::Place(place) = entity {
                place.amenity_ids = links.remove(&place.id).unwrap_or_default();
            }
        }
        Ok(())
    }

    async fn stage(&self, entity: &Entity) -> Result<(), StorageError> {
        self.conn
            .execute(
                &upsert_sql(entity.kind()),
                libsql::params_from_iter(bind_values(entity)),
            )
            .await?;
        if let Entity::Place(place) = entity {
            self.sync_amenity_links(place).await?;
        }
        Ok(())
    }

    async fn sync_amenity_links(&self, place: &Place) -> Result<(), StorageError> {
        self.conn
            .execute(
                "DELETE FROM place_amenity WHERE place_id = ?1",
                [place.id.as_str()],
            )
            .await?;
        for (position, amenity_id) in place.amenity_ids.iter().enumerate() {
            self.conn
                .execute(
                    "INSERT INTO place_amenity (place_id, amenity_id, position) VALUES (?1, ?2, ?3)",
                    libsql::params![
                        place.id.as_str(),
                        amenity_id.as_str(),
                        i64::try_from(position).unwrap_or(i64::MAX)
                    ],
                )
                .await?;
        }
        Ok(())
    }
}

impl Engine for DbEngine {
    fn policy(&self) -> SerializationPolicy {
        SerializationPolicy::RELATIONAL
    }

    async fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>, StorageError> {
        let kinds = kind.map_or_else(|| EntityKind::ALL.to_vec(), |k| vec![k]);
        let mut out = BTreeMap::new();
        for kind in kinds {
            let sql = format!("SELECT {} FROM {}", select_list(kind, None), kind.table());
            for entity in self.query_entities(kind, &sql, Vec::new()).await? {
                out.insert(entity.composite_key(), entity);
            }
        }
        Ok(out)
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            select_list(kind, None),
            kind.table()
        );
        Ok(self
            .query_entities(kind, &sql, vec![id.into()])
            .await?
            .into_iter()
            .next())
    }

    async fn new(&mut self, entity: Entity) -> Result<(), StorageError> {
        self.begin().await?;
        // A place spans several statements; a failure must not leave half of them staged.
        self.conn.execute("SAVEPOINT stage", ()).await?;
        match self.stage(&entity).await {
            Ok(()) => {
                self.conn.execute("RELEASE stage", ()).await?;
                debug!(key = %entity.composite_key(), "staged");
                Ok(())
            }
            Err(e) => {
                warn!(key = %entity.composite_key(), error = %e, "stage failed, undoing its writes");
                self.conn.execute("ROLLBACK TO stage", ()).await?;
                self.conn.execute("RELEASE stage", ()).await?;
                Err(e)
            }
        }
    }

    async fn delete(&mut self, kind: EntityKind, id: &str) -> Result<bool, StorageError> {
        self.begin().await?;
        let affected = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1", kind.table()), [id])
            .await?;
        if affected > 0 {
            debug!(kind = %kind, id, "staged removal");
        }
        Ok(affected > 0)
    }

    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        let kinds = kind.map_or_else(|| EntityKind::ALL.to_vec(), |k| vec![k]);
        let mut total = 0usize;
        for kind in kinds {
            let mut rows = self
                .conn
                .query(&format!("SELECT COUNT(*) FROM {}", kind.table()), ())
                .await?;
            let row = rows
                .next()
                .await?
                .ok_or_else(|| StorageError::Query(format!("COUNT on {} returned no row", kind.table())))?;
            let n = row.get::<i64>(0)?;
            total += usize::try_from(n)
                .map_err(|e| StorageError::Query(format!("COUNT on {}: {e}", kind.table())))?;
        }
        Ok(total)
    }

    async fn save(&mut self) -> Result<(), StorageError> {
        if !self.in_session {
            return Ok(());
        }
        match self.conn.execute("COMMIT", ()).await {
            Ok(_) => {
                self.in_session = false;
                info!("session committed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "commit failed, rolling back session");
                self.rollback().await?;
                if is_constraint_violation(&e) {
                    Err(StorageError::Constraint(e.to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn reload(&mut self) -> Result<(), StorageError> {
        if self.in_session {
            warn!("reload discards the open session");
        }
        self.rollback().await?;
        self.run_migrations().await?;
        info!("schema ensured, fresh session");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        self.rollback().await
    }

    async fn children(
        &self,
        relation: Relation,
        parent_id: &str,
    ) -> Result<Vec<Entity>, StorageError> {
        let child = relation.child();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            select_list(child, None),
            child.table(),
            relation.foreign_key()
        );
        self.query_entities(child, &sql, vec![parent_id.into()]).await
    }

    async fn amenities_of(&self, place_id: &str) -> Result<Vec<Amenity>, StorageError> {
        let sql = format!(
            "SELECT {} FROM amenities a JOIN place_amenity pa ON pa.amenity_id = a.id \
             WHERE pa.place_id = ?1 ORDER BY pa.position",
            select_list(Amenity::KIND, Some("a"))
        );
        Ok(self
            .query_entities(Amenity::KIND, &sql, vec![place_id.into()])
            .await?
            .into_iter()
            .filter_map(Entity::into_model)
            .collect())
    }

    async fn places_with_amenity(&self, amenity_id: &str) -> Result<Vec<Place>, StorageError> {
        let sql = format!(
            "SELECT {} FROM places p JOIN place_amenity pa ON pa.place_id = p.id \
             WHERE pa.amenity_id = ?1",
            select_list(Place::KIND, Some("p"))
        );
        Ok(self
            .query_entities(Place::KIND, &sql, vec![amenity_id.into()])
            .await?
            .into_iter()
            .filter_map(Entity::into_model)
            .collect())
    }
}
