//! Collection file access
//!
//! A collection file holds one JSON document such as `{"users": [...]}`.
//! Reads never fail: a missing or unparsable file loads as an empty
//! document, so callers default the collection key themselves. Writes
//! project every known collection to its field allowlist and rewrite the
//! whole file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::collection::{project, CollectionKind};
use super::errors::{StorageError, StorageResult};
use crate::observability::Logger;

/// Load the document stored at `path`.
///
/// Returns an empty object when the file cannot be read or parsed.
pub fn load(path: &Path) -> Value {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log_load_failure(path, &e.to_string());
            }
            return Value::Object(Map::new());
        }
    };

    match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            log_load_failure(path, &e.to_string());
            Value::Object(Map::new())
        }
    }
}

fn log_load_failure(path: &Path, reason: &str) {
    let path_text = path.display().to_string();
    Logger::warn(
        "STORAGE_LOAD_FAILED",
        &[("path", path_text.as_str()), ("reason", reason)],
    );
}

/// Project `document` to the field allowlists and overwrite `path` with it.
///
/// The file is rewritten in full, pretty-printed. Parent directories are
/// created as needed.
pub fn save(path: &Path, document: &Value) -> StorageResult<()> {
    let projected = project_document(document);
    let mut content = serde_json::to_string_pretty(&projected)?;
    content.push('\n');

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    fs::write(path, content).map_err(|e| {
        let err = StorageError::io(path, e);
        let path_text = path.display().to_string();
        let reason = err.to_string();
        Logger::error(
            "STORAGE_WRITE_FAILED",
            &[("path", path_text.as_str()), ("reason", reason.as_str())],
        );
        err
    })
}

/// Apply the allowlist of every collection key present in `document`.
///
/// Keys that are not collections pass through untouched.
pub fn project_document(document: &Value) -> Value {
    let Value::Object(entries) = document else {
        return document.clone();
    };

    let mut projected = Map::new();
    for (key, value) in entries {
        let value = match (CollectionKind::from_key(key), value) {
            (Some(kind), Value::Array(records)) => {
                Value::Array(records.iter().map(|r| project(kind, r)).collect())
            }
            _ => value.clone(),
        };
        projected.insert(key.clone(), value);
    }
    Value::Object(projected)
}
