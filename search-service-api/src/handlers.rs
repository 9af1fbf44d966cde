//! Route handlers.

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use crate::dto::{
    HealthResponse, IndexItemRequest, IndexItemResponse, SearchParams, SearchRequest,
    SearchResponseBody,
};
use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;
use search_service_repository::filters_to_tokens;
use search_service_shared::{SearchQuery, DEFAULT_LIMIT};

/// Static liveness status. Does not contact the engine.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn search_get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<SearchResponseBody>, ApiError> {
    let query = SearchQuery::new(params.query).with_limit(params.limit.unwrap_or(DEFAULT_LIMIT));
    run_search(&state, query).await
}

pub async fn search_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponseBody>, ApiError> {
    let mut filters = request.filters;
    filters.extend(filters_to_tokens(&request.structured_filters)?);

    let query = SearchQuery::new(request.query)
        .with_filters(filters)
        .with_limit(request.limit);
    run_search(&state, query).await
}

async fn run_search(
    state: &AppState,
    query: SearchQuery,
) -> Result<Json<SearchResponseBody>, ApiError> {
    let outcome = state.service.search(&query).await?;
    debug!(
        results = outcome.results().len(),
        degraded = outcome.is_degraded(),
        "Search served"
    );
    Ok(Json(outcome.into()))
}

pub async fn index_item(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IndexItemRequest>,
) -> Json<IndexItemResponse> {
    let success = state.service.index_item(&request.id, &request.content).await;
    info!(doc_id = %request.id, success, "Index request handled");
    Json(IndexItemResponse { success })
}

pub async fn get_document(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    match state.service.get_document(&id).await? {
        Some(document) => Ok(Json(Value::Object(document))),
        None => Err(ApiError::NotFound(format!("Document {} not found", id))),
    }
}
