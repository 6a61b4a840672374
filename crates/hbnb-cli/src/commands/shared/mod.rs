pub mod parse;

use hbnb_core::Model;
use hbnb_storage::Storage;
use serde_json::Value;

/// Represent `models` under the active backend's policy, as a JSON array.
pub fn render_models<T: Model>(storage: &Storage, models: Vec<T>) -> anyhow::Result<Value> {
    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(Value::Object(
            storage.to_representation(&model.into_entity())?,
        ));
    }
    Ok(Value::Array(items))
}
