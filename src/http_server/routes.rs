//! Collection Routes
//!
//! Dispatch for `/users` and `/posts`:
//!
//! | Method | Query       | Effect                         |
//! |--------|-------------|--------------------------------|
//! | GET    | (none)      | whole collection document      |
//! | GET    | `id`        | single record                  |
//! | POST   |             | create, id assigned            |
//! | PUT    | `id` (req.) | shallow-merge body into record |
//! | DELETE | `id` (req.) | remove record                  |
//!
//! Any other method on these paths, and any other path, answers with the
//! route listing.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json,
};
use serde_json::Value;

use super::body::read_object;
use super::errors::{ApiError, ApiResult};
use super::response::{available_routes, message, message_with_record};
use super::state::AppState;
use crate::observability::Logger;
use crate::storage::{
    document_of, next_id, parse_id, project, record_id, records_of, replace_records,
    CollectionKind,
};

type SharedState = Arc<AppState>;
type QueryMap = HashMap<String, String>;

/// Method router for one collection path
pub fn collection_routes(kind: CollectionKind) -> MethodRouter<SharedState> {
    get(move |State(state): State<SharedState>, Query(query): Query<QueryMap>| async move {
        list_or_get_handler(state, kind, query).await
    })
    .post(move |State(state): State<SharedState>, body: Bytes| async move {
        create_handler(state, kind, body).await
    })
    .put(
        move |State(state): State<SharedState>,
              Query(query): Query<QueryMap>,
              body: Bytes| async move { update_handler(state, kind, query, body).await },
    )
    .delete(move |State(state): State<SharedState>, Query(query): Query<QueryMap>| async move {
        delete_handler(state, kind, query).await
    })
    .fallback(routes_handler)
}

/// Route listing, served for every unmatched request
pub async fn routes_handler() -> Json<Value> {
    Json(available_routes())
}

// ==================
// Query Parameters
// ==================

/// The `id` query parameter as an integer, if supplied.
///
/// A blank value counts as absent.
fn id_param(query: &QueryMap) -> ApiResult<Option<i64>> {
    match query.get("id").map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => parse_id(raw).map(Some).ok_or_else(|| {
            ApiError::InvalidQueryParam(format!("id must be an integer, got '{}'", raw))
        }),
    }
}

fn require_id(query: &QueryMap) -> ApiResult<i64> {
    id_param(query)?.ok_or(ApiError::MissingParam("id"))
}

fn find_index(records: &[Value], id: i64) -> Option<usize> {
    records.iter().position(|r| record_id(r) == Some(id))
}

/// Current UTC date as `YYYY-MM-DD`
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

// ==================
// Handlers
// ==================

async fn list_or_get_handler(
    state: SharedState,
    kind: CollectionKind,
    query: QueryMap,
) -> ApiResult<Response> {
    let id = id_param(&query)?;
    let store = state.collection(kind);

    let _guard = store.lock().await;
    let records = records_of(&store.load(), kind);

    match id {
        None => {
            let projected = records.iter().map(|r| project(kind, r)).collect();
            Ok(Json(document_of(kind, projected)).into_response())
        }
        Some(id) => {
            let index = find_index(&records, id).ok_or(ApiError::NotFound(kind))?;
            Ok(Json(project(kind, &records[index])).into_response())
        }
    }
}

async fn create_handler(
    state: SharedState,
    kind: CollectionKind,
    body: Bytes,
) -> ApiResult<Response> {
    let mut fields = read_object(&body)?;
    let store = state.collection(kind);

    let _guard = store.lock().await;
    let document = store.load();
    let mut records = records_of(&document, kind);

    let id = next_id(&records).ok_or(ApiError::IdsExhausted(kind))?;
    fields.insert("id".to_string(), Value::from(id));
    if kind == CollectionKind::Posts {
        fields.insert("date".to_string(), Value::String(today()));
    }

    let created = project(kind, &Value::Object(fields));
    records.push(created.clone());
    store.save(&replace_records(document, kind, records))?;

    Logger::info(
        "RECORD_CREATED",
        &[("collection", kind.key()), ("id", id.to_string().as_str())],
    );

    let body = message_with_record(format!("{} created", kind.label()), kind, created);
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn update_handler(
    state: SharedState,
    kind: CollectionKind,
    query: QueryMap,
    body: Bytes,
) -> ApiResult<Response> {
    let id = require_id(&query)?;
    let patch = read_object(&body)?;
    let store = state.collection(kind);

    let _guard = store.lock().await;
    let document = store.load();
    let mut records = records_of(&document, kind);

    let index = find_index(&records, id).ok_or(ApiError::NotFound(kind))?;
    if let Value::Object(existing) = &mut records[index] {
        existing.extend(patch);
    }

    let updated = project(kind, &records[index]);
    store.save(&replace_records(document, kind, records))?;

    Logger::info(
        "RECORD_UPDATED",
        &[("collection", kind.key()), ("id", id.to_string().as_str())],
    );

    let body = message_with_record(format!("{} updated", kind.label()), kind, updated);
    Ok(Json(body).into_response())
}

async fn delete_handler(
    state: SharedState,
    kind: CollectionKind,
    query: QueryMap,
) -> ApiResult<Response> {
    let id = require_id(&query)?;
    let store = state.collection(kind);

    let _guard = store.lock().await;
    let records = records_of(&store.load(), kind);
    let before = records.len();

    let remaining: Vec<Value> = records
        .into_iter()
        .filter(|r| record_id(r) != Some(id))
        .collect();

    if remaining.len() == before {
        return Err(ApiError::NotFound(kind));
    }

    store.save(&document_of(kind, remaining))?;

    Logger::info(
        "RECORD_DELETED",
        &[("collection", kind.key()), ("id", id.to_string().as_str())],
    );

    Ok(Json(message(format!("{} deleted", kind.label()))).into_response())
}
