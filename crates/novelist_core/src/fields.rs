//! Lenient mapping from model-generated JSON onto typed record fields.
//!
//! Models rarely honour a schema exactly: a list arrives as a single
//! string, an object arrives as prose, a key is missing. These helpers
//! accept whatever shape turned up and coerce it into the field's type
//! instead of failing.

use serde_json::{Map, Value};

/// Coerce a value into text.
///
/// Strings are kept, `null` and missing values become empty, and any other
/// JSON is pretty-printed.
///
/// ```
/// use novelist_core::fields::text_field;
/// use serde_json::json;
///
/// assert_eq!(text_field(Some(&json!("Aurelia"))), "Aurelia");
/// assert_eq!(text_field(None), "");
/// assert_eq!(text_field(Some(&json!(3))), "3");
/// ```
pub fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

/// Coerce a value into a list. Arrays are kept, scalars and objects are
/// wrapped in a one-element list, `null` becomes empty.
pub fn list_field(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(text)) if text.trim().is_empty() => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

/// Coerce a value into a list of strings.
///
/// Objects become `key: value` lines so no generated detail is lost.
///
/// ```
/// use novelist_core::fields::string_list_field;
/// use serde_json::json;
///
/// assert_eq!(string_list_field(Some(&json!(["brave", "stubborn"]))), vec!["brave", "stubborn"]);
/// assert_eq!(string_list_field(Some(&json!("brave"))), vec!["brave"]);
/// assert_eq!(string_list_field(Some(&json!({"core": "loyal"}))), vec!["core: loyal"]);
/// ```
pub fn string_list_field(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text_field(Some(item)))
            .filter(|text| !text.trim().is_empty())
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, item)| format!("{}: {}", key, text_field(Some(item))))
            .collect(),
        Some(Value::String(text)) if text.trim().is_empty() => Vec::new(),
        Some(other) => vec![text_field(Some(other))],
    }
}

/// Coerce a value into a JSON object. Non-object values are kept under a
/// `description` key.
pub fn object_field(value: Option<&Value>) -> Map<String, Value> {
    match value {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            let mut map = Map::new();
            map.insert("description".to_string(), other.clone());
            map
        }
    }
}

/// First non-empty text among several candidate keys.
pub fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|key| text_field(map.get(*key)))
        .find(|text| !text.trim().is_empty())
}

/// Truncate to at most `max_chars` Unicode scalar values.
///
/// ```
/// use novelist_core::fields::truncate_chars;
///
/// assert_eq!(truncate_chars("星辰大海", 2), "星辰");
/// assert_eq!(truncate_chars("short", 10), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Count Unicode scalar values, the unit used for chapter lengths.
pub fn word_count(text: &str) -> usize {
    text.chars().count()
}

/// Display name of a list item: its `name` (or `title`) key when it is an
/// object, its text when it is a string, `fallback` otherwise.
pub fn item_name(item: &Value, fallback: impl FnOnce() -> String) -> String {
    match item {
        Value::String(text) => text.clone(),
        Value::Object(map) => first_text(map, &["name", "title"]).unwrap_or_else(fallback),
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_field_pretty_prints_structures() {
        let text = text_field(Some(&json!({"era": "Dawn"})));
        assert!(text.contains("\"era\""));
        assert!(text.contains("Dawn"));
        assert_eq!(text_field(Some(&Value::Null)), "");
    }

    #[test]
    fn list_field_wraps_scalars_and_objects() {
        assert_eq!(list_field(Some(&json!("one law"))), vec![json!("one law")]);
        assert_eq!(list_field(Some(&json!({"name": "x"}))), vec![json!({"name": "x"})]);
        assert_eq!(list_field(Some(&json!([1, 2]))).len(), 2);
        assert!(list_field(Some(&json!("  "))).is_empty());
        assert!(list_field(None).is_empty());
    }

    #[test]
    fn string_list_field_drops_blank_entries() {
        let traits = string_list_field(Some(&json!(["kind", "", "  ", "curious"])));
        assert_eq!(traits, vec!["kind", "curious"]);
    }

    #[test]
    fn object_field_keeps_prose_under_description() {
        let map = object_field(Some(&json!("a tall elf")));
        assert_eq!(map.get("description"), Some(&json!("a tall elf")));
        assert!(object_field(None).is_empty());
    }

    #[test]
    fn item_name_prefers_name_then_title() {
        assert_eq!(item_name(&json!({"name": "Guild"}), || "x".into()), "Guild");
        assert_eq!(item_name(&json!({"title": "Exile"}), || "x".into()), "Exile");
        assert_eq!(item_name(&json!({"size": 3}), || "Region 1".into()), "Region 1");
        assert_eq!(item_name(&json!(42), || "fallback".into()), "fallback");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(word_count("龙之国度"), 4);
        assert_eq!(word_count(""), 0);
    }
}
