//! # hbnb-core
//!
//! Core types for the hbnb storage platform.
//!
//! This crate provides the foundational types shared by every storage engine:
//! - Entity structs (states, cities, users, places, reviews, amenities)
//! - The `Entity` sum type and its `__class__` discriminator mapping
//! - Identity and timestamp assignment
//! - The serialized representation contract and per-backend policy
//! - Ownership relations used for relationship lookups and cascades
//! - Password digesting
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod password;
pub mod relations;
pub mod representation;
pub mod timestamps;

pub use entities::{Amenity, City, Entity, Model, Place, Review, State, User};
pub use enums::EntityKind;
pub use errors::CoreError;
pub use relations::Relation;
pub use representation::SerializationPolicy;
