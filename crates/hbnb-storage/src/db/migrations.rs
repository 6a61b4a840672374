//! Schema creation for the relational engine.
//!
//! Embeds the SQL migration files at compile time. All statements use
//! `IF NOT EXISTS`, so running them on every reload is idempotent.

use tracing::info;

use super::DbEngine;
use crate::error::StorageError;

const MIGRATION_001: &str = include_str!("../../migrations/001_initial.sql");

/// Dependents before the tables they reference.
const DROP_ORDER: [&str; 7] = [
    "place_amenity",
    "reviews",
    "places",
    "cities",
    "amenities",
    "users",
    "states",
];

impl DbEngine {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StorageError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }

    /// Drop every hbnb table. Used at open in test mode.
    pub(crate) async fn drop_all(&self) -> Result<(), StorageError> {
        for table in DROP_ORDER {
            self.conn
                .execute(&format!("DROP TABLE IF EXISTS {table}"), ())
                .await
                .map_err(|e| StorageError::Migration(format!("drop {table}: {e}")))?;
        }
        info!("test mode: dropped all tables");
        Ok(())
    }
}
