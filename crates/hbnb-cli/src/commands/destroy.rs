use anyhow::bail;
use hbnb_storage::Storage;
use serde_json::{Value, json};

use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::parse::parse_kind;

/// Handle `hbnb destroy`. Cascades to owned entities.
pub async fn run(args: &ShowArgs, storage: &mut Storage) -> anyhow::Result<Value> {
    let kind = parse_kind(&args.class)?;
    let removed = storage.delete(kind, &args.id).await?;
    if removed == 0 {
        bail!("no instance found: {kind}.{}", args.id);
    }
    storage.save().await?;
    Ok(json!({"deleted": removed}))
}
