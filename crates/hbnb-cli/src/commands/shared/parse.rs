use hbnb_core::EntityKind;
use serde_json::{Number, Value};

/// Parse an entity class name (`State`, `Place`, ...).
pub fn parse_kind(raw: &str) -> anyhow::Result<EntityKind> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("unknown class '{raw}'"))
}

/// Strip surrounding double quotes, unescaping inner `\"`.
fn unquote(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\\\"", "\""))
}

/// Parse a bare numeric value: a float when it has a `.`, an integer otherwise.
fn parse_number(raw: &str) -> Option<Value> {
    if raw.contains('.') {
        raw.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    } else {
        raw.parse::<i64>().ok().map(Value::from)
    }
}

/// Parse a `key=value` creation parameter.
///
/// Quoted values are strings with `_` turned into spaces. Unquoted values
/// must be numbers. Anything else yields `None` and is skipped by the caller.
pub fn parse_param(raw: &str) -> Option<(String, Value)> {
    let (key, value) = raw.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    let value = match unquote(value) {
        Some(s) => Value::String(s.replace('_', " ")),
        None => parse_number(value)?,
    };
    Some((key.to_string(), value))
}

/// Parse an `update` value against the attribute's current value.
///
/// String attributes take the raw text (quotes stripped). Other attributes
/// take a number when the text is numeric, else a string.
pub fn parse_update_value(raw: &str, current: Option<&Value>) -> Value {
    let text = unquote(raw).unwrap_or_else(|| raw.to_string());
    if matches!(current, Some(Value::String(_))) {
        return Value::String(text);
    }
    parse_number(&text).unwrap_or(Value::String(text))
}
