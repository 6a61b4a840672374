use hbnb_storage::Storage;
use serde_json::Value;

/// Handle `hbnb stats`.
pub async fn run(storage: &Storage) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(storage.stats().await?)?)
}
