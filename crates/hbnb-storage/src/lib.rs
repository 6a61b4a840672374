//! # hbnb-storage
//!
//! Persistence for hbnb entities behind one facade.
//!
//! Two engines implement [`Engine`]:
//! - [`FileEngine`]: every live entity in memory, flushed to one JSON object
//!   keyed by `"Type.id"` on save.
//! - [`DbEngine`]: libSQL tables; a session is an open transaction and
//!   foreign keys are checked at commit.
//!
//! [`Storage`] selects an engine from [`hbnb_config::StorageConfig`] and adds
//! what must behave identically on both: cascade delete, relationship
//! traversal, place search, and idempotent amenity linking.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) for the relational engine.

pub mod db;
pub mod engine;
pub mod error;
pub mod facade;
pub mod file;

pub use db::DbEngine;
pub use engine::{AnyEngine, Engine};
pub use error::StorageError;
pub use facade::{LinkOutcome, PlaceSearch, Storage, UnlinkOutcome};
pub use file::FileEngine;
