//! Data model updates: entry-list conversion and path merging.
//!
//! Paths are slash separated (`/user/name`); an empty path or `/` is the
//! root object.

use serde_json::{Map, Value};

/// Convert `dataModelUpdate.contents` into a plain JSON value.
///
/// A JSON array is read as a v0.8 entry list
/// (`[{ "key": "name", "valueString": "Ada" }]`); any other value is taken
/// as-is.
pub fn contents_to_value(contents: &Value) -> Result<Value, String> {
    match contents {
        Value::Array(entries) => entries_to_object(entries).map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn entries_to_object(entries: &[Value]) -> Result<Map<String, Value>, String> {
    let mut object = Map::new();
    for (idx, entry) in entries.iter().enumerate() {
        let key = entry
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("entry {idx} has no string `key`"))?;
        object.insert(key.to_string(), entry_value(key, entry)?);
    }
    Ok(object)
}

fn entry_value(key: &str, entry: &Value) -> Result<Value, String> {
    if let Some(value) = entry.get("valueString") {
        return Ok(value.clone());
    }
    if let Some(value) = entry.get("valueNumber") {
        return Ok(value.clone());
    }
    if let Some(value) = entry.get("valueBoolean") {
        return Ok(value.clone());
    }
    if let Some(value) = entry.get("valueMap") {
        return match value {
            Value::Array(nested) => entries_to_object(nested).map(Value::Object),
            _ => Err(format!("entry `{key}` has a non-list `valueMap`")),
        };
    }
    Err(format!("entry `{key}` has no value"))
}

pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Merge `value` into `root` at `path`.
///
/// Objects merge key by key into an existing object; anything else replaces
/// what is there. Missing intermediate objects are created. On error `root`
/// may be partially modified, so callers work on a copy.
pub fn merge_at(root: &mut Map<String, Value>, path: &str, value: Value) -> Result<(), String> {
    let segments = split_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return match value {
            Value::Object(fields) => {
                root.extend(fields);
                Ok(())
            }
            _ => Err("root contents must be an object".to_string()),
        };
    };

    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(next) => next,
            _ => return Err(format!("`{segment}` is not an object")),
        };
    }

    match value {
        Value::Object(fields) => {
            if let Some(Value::Object(existing)) = current.get_mut(*last) {
                existing.extend(fields);
            } else {
                current.insert(last.to_string(), Value::Object(fields));
            }
        }
        value => {
            current.insert(last.to_string(), value);
        }
    }
    Ok(())
}

/// Look up the value at `path`, if present.
pub fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let segments = split_path(path);
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(*first)?;
    for segment in rest {
        current = match current {
            Value::Object(object) => object.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
