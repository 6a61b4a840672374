use anyhow::bail;
use hbnb_storage::{LinkOutcome, Storage, UnlinkOutcome};
use serde_json::{Value, json};

use crate::cli::root_commands::LinkArgs;

/// Handle `hbnb link`. Linking an already linked amenity succeeds unchanged.
pub async fn run_link(args: &LinkArgs, storage: &mut Storage) -> anyhow::Result<Value> {
    let existing = match storage.link_amenity(&args.place_id, &args.amenity_id).await? {
        LinkOutcome::Linked => false,
        LinkOutcome::AlreadyLinked => true,
        LinkOutcome::NotFound(kind) => bail!("no instance found: {kind}"),
    };
    storage.save().await?;
    Ok(json!({
        "place_id": args.place_id,
        "amenity_id": args.amenity_id,
        "existing": existing,
    }))
}

/// Handle `hbnb unlink`.
pub async fn run_unlink(args: &LinkArgs, storage: &mut Storage) -> anyhow::Result<Value> {
    match storage.unlink_amenity(&args.place_id, &args.amenity_id).await? {
        UnlinkOutcome::Unlinked => {}
        UnlinkOutcome::NotLinked => bail!(
            "amenity {} is not linked to place {}",
            args.amenity_id,
            args.place_id
        ),
        UnlinkOutcome::NotFound(kind) => bail!("no instance found: {kind}"),
    }
    storage.save().await?;
    Ok(json!({"unlinked": true}))
}
