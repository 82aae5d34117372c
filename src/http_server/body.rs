//! Request body decoding
//!
//! The body is collected in full by the `Bytes` extractor and parsed once.
//! An absent body reads as an empty object.

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::storage::Record;

/// Parse a collected body as JSON; empty or blank bodies yield `{}`.
pub fn read_json(body: &[u8]) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Parse a collected body that must be a JSON object.
pub fn read_object(body: &[u8]) -> ApiResult<Record> {
    match read_json(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(ApiError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(read_json(b"").unwrap(), json!({}));
        assert_eq!(read_json(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_valid_body() {
        let fields = read_object(br#"{"name": "Ada", "age": 36}"#).unwrap();
        assert_eq!(fields["name"], "Ada");
        assert_eq!(fields["age"], 36);
    }

    #[test]
    fn test_malformed_body_is_invalid() {
        let err = read_json(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let err = read_object(b"[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
