//! HTTP request handlers for the string analysis service.
//!
//! Each handler locks the repository once and issues its store calls
//! sequentially, so within one process the existence check and insert of
//! `POST /strings` cannot interleave. Several processes sharing one SQLite
//! file can still race between the check and the insert; the later write wins.

use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router as AxumRouter,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use verbatim_domain::{normalize_value, PredicateSet, RecordId, StringRecord};
use verbatim_query::{apply_filters, parse_params, resolve_natural_language};
use verbatim_store::RecordRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Typed record store
    pub repository: Arc<Mutex<RecordRepository>>,
}

impl AppState {
    /// Wrap a repository for sharing across requests
    pub fn new(repository: RecordRepository) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
        }
    }

    fn repository(&self) -> Result<MutexGuard<'_, RecordRepository>, ApiError> {
        self.repository
            .lock()
            .map_err(|_| ApiError::Internal("record store lock poisoned".to_string()))
    }
}

/// Filtered listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Matching records
    pub data: Vec<StringRecord>,
    /// Number of matching records
    pub count: usize,
    /// Predicates applied, in canonical form
    pub filters_applied: PredicateSet,
}

/// Natural-language listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    /// Matching records
    pub data: Vec<StringRecord>,
    /// Number of matching records
    pub count: usize,
    /// How the query was understood
    pub interpreted_query: InterpretedQuery,
}

/// Echo of a natural-language query and its interpretation
#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// Query text as received
    pub original: String,
    /// Predicates the query was translated into
    pub parsed_filters: PredicateSet,
}

/// Natural-language query parameters
#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    /// Free-text query
    pub query: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of stored records
    pub record_count: usize,
}

/// POST /strings - Analyze and store a new value
async fn create_string(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StringRecord>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let value = extract_value(&body)?;

    let record = StringRecord::new(value, Utc::now());
    let mut repository = state.repository()?;

    if repository.get(&record.id)?.is_some() {
        return Err(ApiError::Conflict(
            "String already exists in the system".to_string(),
        ));
    }

    repository.put(&record)?;
    info!(id = %record.id, length = record.properties.length, "created record");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Pull a non-empty string out of a `{"value": ...}` body
fn extract_value(body: &Value) -> Result<&str, ApiError> {
    let field = match body {
        Value::Object(map) => map.get("value"),
        _ => {
            return Err(ApiError::InvalidInput(
                "Request body must be a JSON object".to_string(),
            ))
        }
    };

    match field {
        None | Some(Value::Null) => Err(ApiError::InvalidInput(
            "Missing \"value\" field".to_string(),
        )),
        Some(Value::String(s)) => {
            let value = normalize_value(s);
            if value.is_empty() {
                Err(ApiError::InvalidInput(
                    "\"value\" must not be empty".to_string(),
                ))
            } else {
                Ok(value)
            }
        }
        Some(_) => Err(ApiError::InvalidType(
            "\"value\" must be a string".to_string(),
        )),
    }
}

/// GET /strings/:string_value - Exact lookup by value
async fn get_string(
    State(state): State<AppState>,
    Path(string_value): Path<String>,
) -> Result<Json<StringRecord>, ApiError> {
    let id = RecordId::for_value(normalize_value(&string_value));
    let repository = state.repository()?;

    repository
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("String does not exist in the system".to_string()))
}

/// DELETE /strings/:string_value - Remove a record by value
async fn delete_string(
    State(state): State<AppState>,
    Path(string_value): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = RecordId::for_value(normalize_value(&string_value));
    let mut repository = state.repository()?;

    if repository.get(&id)?.is_none() {
        return Err(ApiError::NotFound(
            "String does not exist in the system".to_string(),
        ));
    }

    repository.delete(&id)?;
    info!(%id, "deleted record");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /strings - List records matching structured filters
async fn list_strings(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let predicates = parse_params(params)?;
    debug!(?predicates, "structured filter");

    let records = state.repository()?.list_all()?;
    let outcome = apply_filters(records, &predicates);

    Ok(Json(ListResponse {
        count: outcome.data.len(),
        data: outcome.data,
        filters_applied: outcome.applied,
    }))
}

/// GET /strings/filter-by-natural-language - List records matching a free-text query
async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let original = params
        .query
        .ok_or_else(|| ApiError::InvalidInput("Missing \"query\" parameter".to_string()))?;

    let predicates = resolve_natural_language(&original)?;
    debug!(query = %original, ?predicates, "interpreted natural language filter");

    let records = state.repository()?.list_all()?;
    let outcome = apply_filters(records, &predicates);

    Ok(Json(NaturalLanguageResponse {
        count: outcome.data.len(),
        data: outcome.data,
        interpreted_query: InterpretedQuery {
            original,
            parsed_filters: outcome.applied,
        },
    }))
}

/// GET /health - Store reachability check
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheckResponse>, ApiError> {
    let record_count = state.repository()?.count()?;

    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        record_count,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/strings", get(list_strings).post(create_string))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route(
            "/strings/:string_value",
            get(get_string).delete(delete_string),
        )
        .route("/health", get(health_check))
        .with_state(state)
}
