//! Collection kinds, field allowlists and id handling.

use std::fmt;

use serde_json::{Map, Value};

/// A record as held in memory: a JSON object.
pub type Record = Map<String, Value>;

/// Fields persisted for a user, in stored order.
pub const USER_FIELDS: &[&str] = &["id", "name", "email", "age", "role"];

/// Fields persisted for a post, in stored order.
pub const POST_FIELDS: &[&str] = &["id", "title", "content", "date"];

/// The two collections served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Users,
    Posts,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Users, CollectionKind::Posts];

    /// Top-level key of the collection document (`users` / `posts`)
    pub fn key(&self) -> &'static str {
        match self {
            CollectionKind::Users => "users",
            CollectionKind::Posts => "posts",
        }
    }

    /// Key used for a single record in responses (`user` / `post`)
    pub fn item_key(&self) -> &'static str {
        match self {
            CollectionKind::Users => "user",
            CollectionKind::Posts => "post",
        }
    }

    /// Human label used in messages (`User` / `Post`)
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Users => "User",
            CollectionKind::Posts => "Post",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            CollectionKind::Users => USER_FIELDS,
            CollectionKind::Posts => POST_FIELDS,
        }
    }

    /// Resolve a document key back to its kind
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keep only the allowlisted fields of `value`, in allowlist order.
///
/// Fields missing from the input stay missing. Non-object values project
/// to an empty object.
pub fn project(kind: CollectionKind, value: &Value) -> Value {
    let mut projected = Record::new();
    if let Value::Object(fields) = value {
        for name in kind.fields() {
            if let Some(v) = fields.get(*name) {
                projected.insert((*name).to_string(), v.clone());
            }
        }
    }
    Value::Object(projected)
}

/// Integer id of a stored record.
///
/// Accepts integer ids and numeric strings; anything else has no id.
pub fn record_id(record: &Value) -> Option<i64> {
    match record.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_id(s),
        _ => None,
    }
}

/// Parse an id supplied as text (e.g. a query parameter).
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Next id to assign: one past the largest id present, or 1.
///
/// `None` when the largest id is already `i64::MAX`.
pub fn next_id(records: &[Value]) -> Option<i64> {
    match records.iter().filter_map(record_id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// The records of `kind` inside a loaded document.
///
/// A missing key or a non-array value yields an empty list.
pub fn records_of(document: &Value, kind: CollectionKind) -> Vec<Value> {
    document
        .get(kind.key())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Build a collection document holding `records` under the kind's key.
pub fn document_of(kind: CollectionKind, records: Vec<Value>) -> Value {
    let mut document = Record::new();
    document.insert(kind.key().to_string(), Value::Array(records));
    Value::Object(document)
}

/// Put `records` back under the kind's key of a loaded document.
///
/// Other top-level keys are kept. A document that is not an object is
/// replaced by a fresh collection document.
pub fn replace_records(document: Value, kind: CollectionKind, records: Vec<Value>) -> Value {
    match document {
        Value::Object(mut entries) => {
            entries.insert(kind.key().to_string(), Value::Array(records));
            Value::Object(entries)
        }
        _ => document_of(kind, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_drops_extra_fields() {
        let user = json!({"id": 1, "name": "Ada", "password": "x", "age": 36});
        let projected = project(CollectionKind::Users, &user);
        assert_eq!(projected, json!({"id": 1, "name": "Ada", "age": 36}));
    }

    #[test]
    fn test_project_uses_allowlist_order() {
        let post = json!({"date": "2024-01-01", "title": "t", "id": 3, "content": "c"});
        let projected = project(CollectionKind::Posts, &post);
        let keys: Vec<_> = projected.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "title", "content", "date"]);
    }

    #[test]
    fn test_record_id_coercion() {
        assert_eq!(record_id(&json!({"id": 7})), Some(7));
        assert_eq!(record_id(&json!({"id": "8"})), Some(8));
        assert_eq!(record_id(&json!({"id": 1.5})), None);
        assert_eq!(record_id(&json!({"name": "no id"})), None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 42 "), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn test_next_id_is_max_based() {
        assert_eq!(next_id(&[]), Some(1));
        assert_eq!(next_id(&[json!({"id": 1}), json!({"id": 2})]), Some(3));
        // Out-of-order ids must not cause reuse
        assert_eq!(next_id(&[json!({"id": 5}), json!({"id": 2})]), Some(6));
    }

    #[test]
    fn test_next_id_exhausted_at_max() {
        assert_eq!(next_id(&[json!({"id": i64::MAX})]), None);
        assert_eq!(next_id(&[json!({"id": i64::MAX - 1})]), Some(i64::MAX));
    }

    #[test]
    fn test_records_of_defaults_to_empty() {
        assert!(records_of(&json!({}), CollectionKind::Users).is_empty());
        assert!(records_of(&json!({"users": "oops"}), CollectionKind::Users).is_empty());
        assert_eq!(
            records_of(&json!({"posts": [{"id": 1}]}), CollectionKind::Posts).len(),
            1
        );
    }

    #[test]
    fn test_replace_records_keeps_other_keys() {
        let document = json!({"users": [{"id": 1}], "meta": "kept"});
        let replaced = replace_records(document, CollectionKind::Users, vec![]);
        assert_eq!(replaced, json!({"users": [], "meta": "kept"}));

        let replaced = replace_records(json!([1, 2]), CollectionKind::Posts, vec![json!({"id": 1})]);
        assert_eq!(replaced, json!({"posts": [{"id": 1}]}));
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(CollectionKind::from_key("users"), Some(CollectionKind::Users));
        assert_eq!(CollectionKind::from_key("posts"), Some(CollectionKind::Posts));
        assert_eq!(CollectionKind::from_key("comments"), None);
        assert_eq!(CollectionKind::Posts.item_key(), "post");
        assert_eq!(CollectionKind::Users.label(), "User");
    }
}
