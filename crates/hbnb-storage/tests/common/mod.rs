//! Shared fixtures for hbnb-storage integration tests.
#![allow(dead_code)]

use hbnb_config::{Backend, DatabaseConfig, FileConfig, StorageConfig};
use hbnb_core::{Amenity, City, Place, Review, State, User};
use hbnb_storage::Storage;
use tempfile::TempDir;

/// Open a fresh storage of the given backend.
///
/// The file backend lives in a temp dir and the relational backend in
/// memory. Keep the returned `TempDir` alive for the test's duration.
pub async fn open(backend: Backend) -> (Storage, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(backend, &dir);
    let storage = Storage::open(&config).await.unwrap();
    (storage, dir)
}

/// Config for `backend` rooted in `dir`. The relational backend uses an
/// on-disk database so that reopening sees earlier commits.
pub fn config_for(backend: Backend, dir: &TempDir) -> StorageConfig {
    StorageConfig {
        backend,
        file: FileConfig {
            path: dir.path().join("file.json"),
        },
        database: DatabaseConfig {
            path: dir.path().join("hbnb.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        },
        ..StorageConfig::default()
    }
}

/// A small saved graph: California → San Francisco → Loft (listed by Betty,
/// reviewed by Betty), plus an unlinked Wifi amenity.
pub struct World {
    pub state: State,
    pub city: City,
    pub user: User,
    pub place: Place,
    pub review: Review,
    pub amenity: Amenity,
}

pub async fn seed(storage: &mut Storage) -> World {
    let state = State::new("California");
    let city = City::new(&state.id, "San Francisco");
    let user = User::new("betty@hbnb.io", "pwd");
    let place = Place::new(&city.id, &user.id, "Loft");
    let review = Review::new(&place.id, &user.id, "Great stay");
    let amenity = Amenity::new("Wifi");

    storage.new(state.clone()).await.unwrap();
    storage.new(city.clone()).await.unwrap();
    storage.new(user.clone()).await.unwrap();
    storage.new(place.clone()).await.unwrap();
    storage.new(review.clone()).await.unwrap();
    storage.new(amenity.clone()).await.unwrap();
    storage.save().await.unwrap();

    World {
        state,
        city,
        user,
        place,
        review,
        amenity,
    }
}
