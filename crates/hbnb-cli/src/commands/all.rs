use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::ClassFilterArgs;
use crate::commands::shared::parse::parse_kind;

/// Handle `hbnb all`.
pub async fn run(args: &ClassFilterArgs, storage: &Storage) -> anyhow::Result<Value> {
    let kind = args.class.as_deref().map(parse_kind).transpose()?;
    let mut items = Vec::new();
    for entity in storage.all(kind).await?.values() {
        items.push(Value::Object(storage.to_representation(entity)?));
    }
    Ok(Value::Array(items))
}
