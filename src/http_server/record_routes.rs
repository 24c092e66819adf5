//! Record HTTP Routes
//!
//! Read and mutation endpoints for the audit trail. Every response body is
//! an [`Envelope`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;

use super::caller::extract_caller;
use crate::envelope::Envelope;
use crate::errors::{RecordError, RecordResult};
use crate::mutation::MutationEngine;
use crate::query::{ListRequest, Listing, QueryEngine};
use crate::record::{Record, RecordKey, RecordTemplate};
use crate::scope::ScopeGuard;
use crate::store::RecordStore;

// ==================
// Shared State
// ==================

/// Engines shared across handlers
pub struct RecordState {
    pub query: QueryEngine,
    pub mutation: MutationEngine,
}

impl RecordState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            query: QueryEngine::new(store.clone()),
            mutation: MutationEngine::new(store),
        }
    }
}

type RecordResponse<T> = Result<Json<Envelope<T>>, RecordError>;
type ActionResponse = (StatusCode, Json<Envelope<usize>>);

/// Create record routes
pub fn record_routes(state: Arc<RecordState>) -> Router {
    Router::new()
        .route("/get-records", get(get_records))
        .route("/get-record", get(get_record))
        .route("/get-records-filter", post(get_records_by_filter))
        .route("/add-record", post(add_record))
        .route("/update-record", post(update_record))
        .route("/delete-record", post(delete_record))
        .with_state(state)
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> RecordResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| RecordError::invalid(format!("malformed request body: {}", e)))
}

fn id_param(query: &HashMap<String, String>) -> RecordResult<RecordKey> {
    query.get("id").map(String::as_str).unwrap_or("").parse()
}

fn action_response(result: RecordResult<usize>) -> ActionResponse {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status_code(),
    };
    (status, Json(Envelope::from_action(&result)))
}

// ==================
// Read Handlers
// ==================

/// GET /get-records
async fn get_records(
    State(state): State<Arc<RecordState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> RecordResponse<Vec<Record>> {
    let caller = extract_caller(&headers)?;
    ScopeGuard::require_admin(&caller)?;
    let request = ListRequest::parse(&query)?;

    let envelope = match state.query.list(&caller, &request)? {
        Listing::All(records) => Envelope::ok(records),
        Listing::Page(page) => Envelope::paged(page.records, page.total_pages),
    };
    Ok(Json(envelope))
}

/// GET /get-record?id=owner/name
async fn get_record(
    State(state): State<Arc<RecordState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> RecordResponse<Record> {
    let caller = extract_caller(&headers)?;
    let key = id_param(&query)?;

    let record = state.query.get(&key)?;
    ScopeGuard::ensure_visible(&caller, &record)?;
    Ok(Json(Envelope::ok(record)))
}

/// POST /get-records-filter
async fn get_records_by_filter(
    State(state): State<Arc<RecordState>>,
    headers: HeaderMap,
    body: Bytes,
) -> RecordResponse<Vec<Record>> {
    let caller = extract_caller(&headers)?;
    let template: RecordTemplate = parse_body(&body)?;

    let records = state
        .query
        .find_by_example(&ScopeGuard::visibility(&caller), &template)?;
    Ok(Json(Envelope::ok(records)))
}

// ==================
// Mutation Handlers
// ==================

/// POST /add-record
async fn add_record(
    State(state): State<Arc<RecordState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ActionResponse {
    action_response(try_add(&state, &headers, &body))
}

fn try_add(state: &RecordState, headers: &HeaderMap, body: &Bytes) -> RecordResult<usize> {
    let caller = extract_caller(headers)?;
    let record: Record = parse_body(body)?;
    state.mutation.add(&ScopeGuard::visibility(&caller), record)
}

/// POST /update-record?id=owner/name
async fn update_record(
    State(state): State<Arc<RecordState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> ActionResponse {
    action_response(try_update(&state, &query, &headers, &body))
}

fn try_update(
    state: &RecordState,
    query: &HashMap<String, String>,
    headers: &HeaderMap,
    body: &Bytes,
) -> RecordResult<usize> {
    let caller = extract_caller(headers)?;
    ScopeGuard::require_admin(&caller)?;
    let id = query.get("id").map(String::as_str).unwrap_or("");
    let record: Record = parse_body(body)?;
    state
        .mutation
        .update(&ScopeGuard::visibility(&caller), id, record)
}

/// POST /delete-record
async fn delete_record(
    State(state): State<Arc<RecordState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ActionResponse {
    action_response(try_delete(&state, &headers, &body))
}

fn try_delete(state: &RecordState, headers: &HeaderMap, body: &Bytes) -> RecordResult<usize> {
    let caller = extract_caller(headers)?;
    ScopeGuard::require_admin(&caller)?;
    let record: Record = parse_body(body)?;
    state
        .mutation
        .delete(&ScopeGuard::visibility(&caller), &record)
}
