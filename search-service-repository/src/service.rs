//! Search service implementation.
//!
//! This module provides the entry points the API layer calls: the read path
//! (query translation, execution, result mapping and the degraded-mode
//! policy) and the write path (index creation, document preparation and
//! upsert).

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, instrument, warn};

use crate::config::{FallbackPolicy, SearchServiceConfig};
use crate::document::prepare_document;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::mapper::map_hits;
use crate::placeholder::placeholder_results;
use crate::types::{SearchOutcome, WriteOutcome};
use search_service_shared::{IndexDocument, SearchFilter, SearchQuery, SearchResult};

/// The search and indexing service.
///
/// Stateless apart from the shared engine handle, so one instance serves all
/// concurrent requests.
pub struct SearchService {
    engine: Arc<dyn SearchEngineClient>,
    config: SearchServiceConfig,
}

impl SearchService {
    /// Create a new SearchService with default configuration.
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            engine,
            config: SearchServiceConfig::default(),
        }
    }

    /// Create a new SearchService with custom configuration.
    pub fn with_config(engine: Arc<dyn SearchEngineClient>, config: SearchServiceConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &SearchServiceConfig {
        &self.config
    }

    /// Search the index.
    /// Input: SearchQuery (query text, raw `field:value` filter tokens, limit)
    /// Output: Result<SearchOutcome, SearchError> (results in engine order)
    ///
    /// A missing index yields an empty result set. Any other failure is
    /// returned as an error, or as placeholder results marked degraded when
    /// the fallback policy is `Placeholder`.
    #[instrument(skip(self, query), fields(query = %query.query, limit = query.limit))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        match self.search_index(query).await {
            Ok(results) => Ok(SearchOutcome::Results(results)),
            Err(e) => {
                error!(error = %e, "Search failed");
                match self.config.fallback {
                    FallbackPolicy::Disabled => Err(e),
                    FallbackPolicy::Placeholder => {
                        warn!("Returning placeholder results");
                        Ok(SearchOutcome::Degraded {
                            results: placeholder_results(&query.query, query.limit, Utc::now()),
                            cause: e.to_string(),
                        })
                    }
                }
            }
        }
    }

    async fn search_index(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        if !self.engine.index_exists().await? {
            debug!("Index does not exist, returning no results");
            return Ok(Vec::new());
        }

        let response = self.engine.search(query).await?;
        map_hits(response.hits, Utc::now())
    }

    /// Create or fully replace the document stored under `id`.
    /// Input: id (required), content (JSON object or plain text)
    /// Output: Result<WriteOutcome, SearchError>
    ///
    /// Creates the index on first use. The write is visible to searches as
    /// soon as this returns.
    #[instrument(skip(self, content), fields(doc_id = %id, content_len = content.len()))]
    pub async fn upsert(&self, id: &str, content: &str) -> Result<WriteOutcome, SearchError> {
        if id.is_empty() {
            return Err(SearchError::invalid_request("id is required"));
        }

        self.engine.ensure_index_exists().await?;

        let document = prepare_document(id, content, Utc::now());
        self.engine.index_document(id, &document).await
    }

    /// Index an item, reporting only whether the engine created or updated it.
    ///
    /// Failures are logged and reported as `false`.
    pub async fn index_item(&self, id: &str, content: &str) -> bool {
        match self.upsert(id, content).await {
            Ok(outcome) if outcome.is_written() => true,
            Ok(outcome) => {
                warn!(doc_id = %id, outcome = ?outcome, "Engine did not write the document");
                false
            }
            Err(e) => {
                error!(doc_id = %id, error = %e, "Failed to index document");
                false
            }
        }
    }

    /// Fetch the stored document for `id`, if any.
    #[instrument(skip(self))]
    pub async fn get_document(&self, id: &str) -> Result<Option<IndexDocument>, SearchError> {
        if id.is_empty() {
            return Err(SearchError::invalid_request("id is required"));
        }

        self.engine.get_document(id).await
    }
}

/// Convert structured filters to `field:value` tokens.
///
/// Only `eq` has a token form; any other operator is rejected rather than
/// applied as equality.
pub fn filters_to_tokens(filters: &[SearchFilter]) -> Result<Vec<String>, SearchError> {
    filters
        .iter()
        .map(|filter| {
            filter
                .to_token()
                .map(|token| token.to_string())
                .ok_or_else(|| {
                    SearchError::unsupported_operator(&filter.field, filter.operator.as_str())
                })
        })
        .collect()
}
