//! Dotted-path access into JSON-like documents
//!
//! `"general.title.de"` walks object keys; numeric segments index arrays.

use serde_json::{Map, Value};

use crate::domain::error::{DomainError, DomainResult};

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

pub fn get_field<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Set `path` to `new_value`, creating intermediate containers as needed.
///
/// Missing or scalar intermediates become objects, or arrays when the next
/// segment is numeric. An array index may address an existing item or append
/// at the end; anything further out fails and leaves the document untouched.
pub fn set_field(value: &mut Value, path: &str, new_value: Value) -> DomainResult<()> {
    let parts: Vec<&str> = segments(path).collect();
    check_indices(value, &parts).map_err(|index| DomainError::FieldIndexOutOfRange {
        path: path.to_string(),
        index,
    })?;
    set_recursive(value, &parts, new_value);
    Ok(())
}

/// First array index along `parts` that lies beyond the end of its array.
///
/// Containers created on the way start empty, so only index 0 is valid there.
fn check_indices(value: &Value, parts: &[&str]) -> Result<(), usize> {
    let mut current = Some(value);
    for part in parts {
        let Ok(i) = part.parse::<usize>() else {
            current = match current {
                Some(Value::Object(map)) => map.get(*part),
                _ => None,
            };
            continue;
        };
        current = match current {
            Some(Value::Array(items)) if i <= items.len() => items.get(i),
            Some(Value::Object(map)) => map.get(*part),
            _ if i == 0 => None,
            _ => return Err(i),
        };
    }
    Ok(())
}

fn set_recursive(current: &mut Value, parts: &[&str], new_value: Value) {
    let Some((head, rest)) = parts.split_first() else {
        *current = new_value;
        return;
    };

    let index = head.parse::<usize>().ok();
    if let (Some(i), Value::Array(items)) = (index, &mut *current) {
        if i == items.len() {
            items.push(Value::Null);
        }
        if let Some(slot) = items.get_mut(i) {
            set_recursive(slot, rest, new_value);
        }
        return;
    }
    if let Value::Object(map) = current {
        let slot = map.entry(head.to_string()).or_insert(Value::Null);
        set_recursive(slot, rest, new_value);
        return;
    }

    *current = match index {
        Some(_) => Value::Array(Vec::new()),
        None => Value::Object(Map::new()),
    };
    set_recursive(current, parts, new_value);
}
