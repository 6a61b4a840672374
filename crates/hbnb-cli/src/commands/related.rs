use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::{RelatedArgs, RelatedKind};
use crate::commands::shared::render_models as render;

/// Handle `hbnb related`.
pub async fn run(args: &RelatedArgs, storage: &Storage) -> anyhow::Result<Value> {
    let id = args.id.as_str();
    match args.relation {
        RelatedKind::Cities => render(storage, storage.cities_of(id).await?),
        RelatedKind::PlacesOfCity => render(storage, storage.places_of_city(id).await?),
        RelatedKind::PlacesOfUser => render(storage, storage.places_of_user(id).await?),
        RelatedKind::ReviewsOfPlace => render(storage, storage.reviews_of_place(id).await?),
        RelatedKind::ReviewsOfUser => render(storage, storage.reviews_of_user(id).await?),
        RelatedKind::Amenities => render(storage, storage.amenities_of(id).await?),
        RelatedKind::PlacesWithAmenity => render(storage, storage.places_with_amenity(id).await?),
    }
}
