//! Dot-path addressing inside JSON records.
//!
//! A path such as `chapters.0.title` walks object keys and, for numeric
//! segments, array indices. The empty path addresses the whole value.

use novelist_error::{StorageError, StorageErrorKind};
use serde_json::Value;

fn invalid(path: &str, segment: &str) -> StorageError {
    StorageError::new(StorageErrorKind::InvalidPath {
        path: path.to_string(),
        segment: segment.to_string(),
    })
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Resolve `path` inside `value`.
///
/// ```
/// use novelist_storage::get_path;
/// use serde_json::json;
///
/// let plot = json!({"chapters": [{"title": "Landfall"}]});
/// assert_eq!(get_path(&plot, "chapters.0.title").unwrap(), &json!("Landfall"));
/// assert!(get_path(&plot, "chapters.3.title").is_err());
/// ```
pub fn get_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value, StorageError> {
    let mut current = value;
    for segment in segments(path) {
        current = step(current, segment).ok_or_else(|| invalid(path, segment))?;
    }
    Ok(current)
}

/// Set the value at `path`.
///
/// Intermediate segments must exist. The final segment may name a new
/// object key, but array indices must already be in bounds. The empty path
/// replaces `value` entirely.
pub fn set_path(value: &mut Value, path: &str, new_value: Value) -> Result<(), StorageError> {
    let parts: Vec<&str> = segments(path).collect();
    let Some((last, parents)) = parts.split_last() else {
        *value = new_value;
        return Ok(());
    };

    let mut target = value;
    for segment in parents {
        target = step_mut(target, segment).ok_or_else(|| invalid(path, segment))?;
    }

    match target {
        Value::Object(map) => {
            map.insert((*last).to_string(), new_value);
            Ok(())
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| invalid(path, last))?;
            *slot = new_value;
            Ok(())
        }
        _ => Err(invalid(path, last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Aurelia",
            "regions": [{"name": "North"}, {"name": "South"}],
            "meta": {"tags": ["sky"]}
        })
    }

    #[test]
    fn empty_path_is_whole_value() {
        let value = sample();
        assert_eq!(get_path(&value, "").unwrap(), &value);
    }

    #[test]
    fn reports_first_missing_segment() {
        let err = get_path(&sample(), "regions.1.climate.rain").unwrap_err();
        match err.kind {
            StorageErrorKind::InvalidPath { segment, .. } => assert_eq!(segment, "climate"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn numeric_segment_on_object_is_a_key() {
        let value = json!({"1": "one"});
        assert_eq!(get_path(&value, "1").unwrap(), &json!("one"));
    }

    #[test]
    fn set_replaces_array_element_and_adds_keys() {
        let mut value = sample();
        set_path(&mut value, "regions.1.name", json!("Deep South")).unwrap();
        set_path(&mut value, "regions.0.climate", json!("cold")).unwrap();
        assert_eq!(value["regions"][1]["name"], json!("Deep South"));
        assert_eq!(value["regions"][0]["climate"], json!("cold"));
    }

    #[test]
    fn set_rejects_out_of_bounds_index() {
        let mut value = sample();
        assert!(set_path(&mut value, "regions.5", json!({})).is_err());
        assert!(set_path(&mut value, "name.first", json!("x")).is_err());
    }
}
