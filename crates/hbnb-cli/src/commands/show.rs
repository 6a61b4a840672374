use anyhow::Context;
use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::parse::parse_kind;

/// Handle `hbnb show`.
pub async fn run(args: &ShowArgs, storage: &Storage) -> anyhow::Result<Value> {
    let kind = parse_kind(&args.class)?;
    let entity = storage
        .get(kind, &args.id)
        .await?
        .with_context(|| format!("no instance found: {kind}.{}", args.id))?;
    Ok(Value::Object(storage.to_representation(&entity)?))
}
