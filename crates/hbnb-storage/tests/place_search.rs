//! Place search over states, cities and amenities, on both engines.

mod common;

use std::time::Duration;

use hbnb_config::Backend;
use hbnb_core::{Amenity, City, Entity, Place, State, User};
use hbnb_storage::{PlaceSearch, Storage};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Two states. West holds Oakland (Loft, linking Wifi and Pool) and Fresno
/// (Barn, linking Wifi); East holds Boston (Condo, no amenities).
struct Map {
    west: State,
    east: State,
    oakland: City,
    boston: City,
    wifi: Amenity,
    pool: Amenity,
}

async fn build(storage: &mut Storage) -> Map {
    let west = State::new("West");
    let east = State::new("East");
    let oakland = City::new(&west.id, "Oakland");
    let fresno = City::new(&west.id, "Fresno");
    let boston = City::new(&east.id, "Boston");
    let host = User::new("host@hbnb.io", "pw");
    let wifi = Amenity::new("Wifi");
    let pool = Amenity::new("Pool");

    let entities: [Entity; 8] = [
        west.clone().into(),
        east.clone().into(),
        oakland.clone().into(),
        fresno.clone().into(),
        boston.clone().into(),
        host.clone().into(),
        wifi.clone().into(),
        pool.clone().into(),
    ];
    for entity in entities {
        storage.new(entity).await.unwrap();
    }

    for (city, name, amenities) in [
        (&oakland, "Loft", vec![&wifi, &pool]),
        (&fresno, "Barn", vec![&wifi]),
        (&boston, "Condo", vec![]),
    ] {
        tokio::time::sleep(Duration::from_millis(2)).await;
        let mut place = Place::new(&city.id, &host.id, name);
        for amenity in amenities {
            place.add_amenity(&amenity.id);
        }
        storage.new(place).await.unwrap();
    }
    storage.save().await.unwrap();

    Map {
        west,
        east,
        oakland,
        boston,
        wifi,
        pool,
    }
}

async fn names(storage: &Storage, search: &PlaceSearch) -> Vec<String> {
    storage
        .search_places(search)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[rstest]
#[case::file(Backend::File)]
#[case::db(Backend::Db)]
#[tokio::test]
async fn empty_search_returns_every_place(#[case] backend: Backend) {
    let (mut storage, _dir) = common::open(backend).await;
    build(&mut storage).await;

    let search = PlaceSearch::default();
    assert!(search.is_empty());
    assert_eq!(names(&storage, &search).await, vec!["Loft", "Barn", "Condo"]);
}

#[rstest]
#[case::file(Backend::File)]
#[case::db(Backend::Db)]
#[tokio::test]
async fn state_expands_to_its_cities(#[case] backend: Backend) {
    let (mut storage, _dir) = common::open(backend).await;
    let map = build(&mut storage).await;

    let search = PlaceSearch {
        states: vec![map.west.id.clone()],
        ..PlaceSearch::default()
    };
    assert_eq!(names(&storage, &search).await, vec!["Loft", "Barn"]);
}

#[rstest]
#[case::file(Backend::File)]
#[case::db(Backend::Db)]
#[tokio::test]
async fn states_and_cities_union_without_repeats(#[case] backend: Backend) {
    let (mut storage, _dir) = common::open(backend).await;
    let map = build(&mut storage).await;

    let search = PlaceSearch {
        states: vec![map.west.id.clone()],
        cities: vec![map.oakland.id.clone(), map.boston.id.clone()],
        ..PlaceSearch::default()
    };
    assert_eq!(names(&storage, &search).await, vec!["Loft", "Barn", "Condo"]);
}

#[rstest]
#[case::file(Backend::File)]
#[case::db(Backend::Db)]
#[tokio::test]
async fn places_must_link_every_amenity(#[case] backend: Backend) {
    let (mut storage, _dir) = common::open(backend).await;
    let map = build(&mut storage).await;

    let both = PlaceSearch {
        amenities: vec![map.wifi.id.clone(), map.pool.id.clone()],
        ..PlaceSearch::default()
    };
    assert_eq!(names(&storage, &both).await, vec!["Loft"]);

    let wifi = PlaceSearch {
        amenities: vec![map.wifi.id.clone()],
        ..PlaceSearch::default()
    };
    assert_eq!(names(&storage, &wifi).await, vec!["Loft", "Barn"]);

    let east_with_wifi = PlaceSearch {
        states: vec![map.east.id.clone()],
        amenities: vec![map.wifi.id.clone()],
        ..PlaceSearch::default()
    };
    assert!(names(&storage, &east_with_wifi).await.is_empty());
}

#[rstest]
#[case::file(Backend::File)]
#[case::db(Backend::Db)]
#[tokio::test]
async fn unknown_ids_match_nothing(#[case] backend: Backend) {
    let (mut storage, _dir) = common::open(backend).await;
    build(&mut storage).await;

    let search = PlaceSearch {
        states: vec!["nope".into()],
        cities: vec!["nowhere".into()],
        ..PlaceSearch::default()
    };
    assert!(names(&storage, &search).await.is_empty());

    let search = PlaceSearch {
        amenities: vec!["sauna".into()],
        ..PlaceSearch::default()
    };
    assert!(names(&storage, &search).await.is_empty());
}

#[test]
fn search_deserializes_from_partial_json() {
    let search: PlaceSearch = serde_json::from_str(r#"{"cities": ["c1"]}"#).unwrap();
    assert_eq!(
        search,
        PlaceSearch {
            cities: vec!["c1".into()],
            ..PlaceSearch::default()
        }
    );
}
