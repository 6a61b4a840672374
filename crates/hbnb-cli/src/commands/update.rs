use anyhow::{Context, bail};
use hbnb_core::{Entity, SerializationPolicy};
use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::UpdateArgs;
use crate::commands::shared::parse::{parse_kind, parse_update_value};

const READ_ONLY: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// Handle `hbnb update`. Sets one attribute and saves.
pub async fn run(args: &UpdateArgs, storage: &mut Storage) -> anyhow::Result<Value> {
    let kind = parse_kind(&args.class)?;
    if READ_ONLY.contains(&args.attribute.as_str()) {
        bail!("attribute '{}' cannot be updated", args.attribute);
    }

    let entity = storage
        .get(kind, &args.id)
        .await?
        .with_context(|| format!("no instance found: {kind}.{}", args.id))?;

    // Full representation: the relational policy would drop the password.
    let mut repr = entity.to_representation(SerializationPolicy::FILE)?;
    let value = parse_update_value(&args.value, repr.get(&args.attribute));
    repr.insert(args.attribute.clone(), value);

    let mut updated = Entity::from_representation(repr)?;
    updated.prepare_save();
    updated.touch();
    storage.new(updated.clone()).await?;
    storage.save().await?;
    Ok(Value::Object(storage.to_representation(&updated)?))
}
