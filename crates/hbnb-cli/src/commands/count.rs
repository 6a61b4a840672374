use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::ClassFilterArgs;
use crate::commands::shared::parse::parse_kind;

/// Handle `hbnb count`.
pub async fn run(args: &ClassFilterArgs, storage: &Storage) -> anyhow::Result<Value> {
    let kind = args.class.as_deref().map(parse_kind).transpose()?;
    Ok(Value::from(storage.count(kind).await?))
}
