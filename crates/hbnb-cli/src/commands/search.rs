use hbnb_storage::{PlaceSearch, Storage};
use serde_json::Value;
use tracing::debug;

use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::render_models;

/// Handle `hbnb search`.
pub async fn run(args: &SearchArgs, storage: &Storage) -> anyhow::Result<Value> {
    let search = PlaceSearch {
        states: args.states.clone(),
        cities: args.cities.clone(),
        amenities: args.amenities.clone(),
    };
    if search.is_empty() {
        debug!("no filters, listing every place");
    }
    render_models(storage, storage.search_places(&search).await?)
}
