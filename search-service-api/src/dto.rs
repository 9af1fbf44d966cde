//! Request and response bodies.

use serde::{Deserialize, Serialize};

use search_service_repository::SearchOutcome;
use search_service_shared::{SearchFilter, SearchResult, DEFAULT_LIMIT};

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<usize>,
}

/// Body of `POST /search`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchRequest {
    pub query: String,
    /// Raw `field:value` tokens. Tokens without a colon are ignored.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Structured filters. Only the `eq` operator is accepted.
    #[serde(default)]
    pub structured_filters: Vec<SearchFilter>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Body returned by both search routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponseBody {
    pub results: Vec<SearchResult>,
    /// Set when `results` are placeholders rather than engine data.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_cause: Option<String>,
}

impl From<SearchOutcome> for SearchResponseBody {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Results(results) => Self {
                results,
                degraded: false,
                degraded_cause: None,
            },
            SearchOutcome::Degraded { results, cause } => Self {
                results,
                degraded: true,
                degraded_cause: Some(cause),
            },
        }
    }
}

/// Body of `POST /index`.
#[derive(Debug, Deserialize, Serialize)]
pub struct IndexItemRequest {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexItemResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
