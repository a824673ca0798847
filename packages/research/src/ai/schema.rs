//! Strict JSON schemas for structured model output.
//!
//! Strict mode on OpenAI-compatible endpoints wants every object closed
//! (`additionalProperties: false`), every property listed in `required`,
//! and no `$ref` indirection. `schemars` output is rewritten to match.

use schemars::{schema_for, JsonSchema};
use serde_json::{Map, Value};

/// Strict-mode schema for `T`.
pub fn strict_schema<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();

    let definitions = match &mut value {
        Value::Object(map) => {
            map.remove("$schema");
            map.remove("definitions")
        }
        _ => None,
    }
    .unwrap_or_else(|| Value::Object(Map::new()));

    tighten(&mut value, &definitions);
    value
}

/// Inline `#/definitions/*` refs and close every object schema.
fn tighten(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|path| path.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();
            if let Some(def) = target {
                *value = def;
                tighten(value, definitions);
                return;
            }

            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".into(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let required = props.keys().cloned().map(Value::String).collect();
                    map.insert("required".into(), Value::Array(required));
                }
            }

            for child in map.values_mut() {
                tighten(child, definitions);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| tighten(item, definitions)),
        _ => {}
    }
}
