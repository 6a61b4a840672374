use hbnb_core::Entity;
use hbnb_storage::Storage;
use serde_json::{Map, Value};
use tracing::warn;

use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::parse::{parse_kind, parse_param};

/// Handle `hbnb create`. Returns the new id.
pub async fn run(args: &CreateArgs, storage: &mut Storage) -> anyhow::Result<Value> {
    let kind = parse_kind(&args.class)?;

    let mut attributes = Map::new();
    for raw in &args.params {
        match parse_param(raw) {
            Some((key, value)) => {
                attributes.insert(key, value);
            }
            None => warn!(param = %raw, "skipping unparseable parameter"),
        }
    }

    let mut entity = Entity::from_attributes(kind, attributes)?;
    entity.prepare_save();
    let id = entity.id().to_string();
    storage.new(entity).await?;
    storage.save().await?;
    Ok(Value::String(id))
}
