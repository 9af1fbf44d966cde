//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::WriteOutcome;
use search_service_shared::{IndexDocument, SearchQuery, SearchResponse};

/// Abstract interface for search engine operations.
///
/// A single handle is created at process start and shared by every request,
/// so implementations must be `Send + Sync` and must not hold per-request
/// state.
///
/// All methods target the service's fixed index.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether the index exists.
    async fn index_exists(&self) -> Result<bool, SearchError>;

    /// Create the index with its field mapping if it does not exist yet.
    ///
    /// Losing a creation race against another writer is not an error.
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Execute a search query against the index.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - Hits in engine order, at most `query.limit`
    /// * `Err(SearchError)` - If the engine is unreachable or rejects the query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError>;

    /// Write `document` under `id`, replacing any previous version.
    ///
    /// The write is visible to searches once this returns.
    async fn index_document(
        &self,
        id: &str,
        document: &IndexDocument,
    ) -> Result<WriteOutcome, SearchError>;

    /// Fetch a stored document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(document))` - The stored source document
    /// * `Ok(None)` - If the document or the index does not exist
    async fn get_document(&self, id: &str) -> Result<Option<IndexDocument>, SearchError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchError>;
}
