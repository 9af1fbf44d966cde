//! # Search Service API
//!
//! HTTP surface of the search service.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/health` | Static liveness status |
//! | GET | `/search?query=..&limit=..` | Search without filters |
//! | POST | `/search` | Search with filter tokens and structured filters |
//! | POST | `/index` | Create or replace a document |
//! | GET | `/documents/{id}` | Fetch a stored document |

mod dto;
mod errors;
mod extract;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use search_service_repository::SearchService;

pub use dto::{
    HealthResponse, IndexItemRequest, IndexItemResponse, SearchParams, SearchRequest,
    SearchResponseBody,
};
pub use errors::ApiError;
pub use extract::{ApiJson, ApiPath, ApiQuery};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
}

impl AppState {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/search",
            get(handlers::search_get).post(handlers::search_post),
        )
        .route("/index", post(handlers::index_item))
        .route("/documents/{id}", get(handlers::get_document))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
