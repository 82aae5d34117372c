//! # Response Formatting

use serde_json::{json, Map, Value};

use crate::storage::CollectionKind;

/// `{"message": ...}`
pub fn message(text: String) -> Value {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(text));
    Value::Object(body)
}

/// `{"message": ..., "<item key>": record}`
pub fn message_with_record(text: String, kind: CollectionKind, record: Value) -> Value {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(text));
    body.insert(kind.item_key().to_string(), record);
    Value::Object(body)
}

/// Static listing of the supported routes
pub fn available_routes() -> Value {
    json!({
        "message": "Available Routes",
        "users": {
            "GET": "/users or /users?id=",
            "POST": "/users",
            "PUT": "/users?id=",
            "DELETE": "/users?id="
        },
        "posts": {
            "GET": "/posts or /posts?id=",
            "POST": "/posts",
            "PUT": "/posts?id=",
            "DELETE": "/posts?id="
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_record_key() {
        let body = message_with_record(
            "Post created".to_string(),
            CollectionKind::Posts,
            json!({"id": 1}),
        );
        assert_eq!(body, json!({"message": "Post created", "post": {"id": 1}}));
    }

    #[test]
    fn test_available_routes_lists_both_collections() {
        let routes = available_routes();
        assert_eq!(routes["message"], "Available Routes");
        for kind in CollectionKind::ALL {
            let entry = &routes[kind.key()];
            assert_eq!(entry["POST"], format!("/{}", kind.key()));
            assert_eq!(entry["DELETE"], format!("/{}?id=", kind.key()));
        }
    }
}
