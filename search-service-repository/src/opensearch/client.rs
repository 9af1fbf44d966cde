//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    cluster::ClusterHealthParts,
    http::response::Response,
    http::StatusCode,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::config::EngineConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::{get_index_settings, INDEX_NAME};
use crate::opensearch::queries::build_search_query;
use crate::types::WriteOutcome;
use search_service_shared::{EngineHit, IndexDocument, SearchQuery, SearchResponse};

/// OpenSearch client implementation.
///
/// Holds one pooled transport for the lifetime of the process.
///
/// # Example
///
/// ```ignore
/// let config = EngineConfig::new("localhost", 9200);
/// let client = OpenSearchClient::new(&config)?;
///
/// client.ensure_index_exists().await?;
/// let response = client.search(&SearchQuery::new("bonds")).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_name: String,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured engine.
    ///
    /// No request is sent; connectivity is only checked by the first call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the address is invalid or the transport cannot be built
    pub fn new(config: &EngineConfig) -> Result<Self, SearchError> {
        let url = config.url()?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some((username, password)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }

        if config.use_ssl && !config.verify_certs {
            warn!(url = %url, "TLS certificate verification is disabled");
            builder = builder.cert_validation(CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            url = %url,
            index = INDEX_NAME,
            authenticated = config.credentials().is_some(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            index_name: INDEX_NAME.to_string(),
        })
    }

    /// The index every operation targets.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Parse a search response body into engine hits.
    fn parse_search_response(body: &Value) -> Result<SearchResponse, SearchError> {
        let hits = body
            .get("hits")
            .and_then(|h| h.get("hits"))
            .and_then(Value::as_array)
            .ok_or_else(|| SearchError::parse("Search response has no hits array"))?;

        // `hits.total` is an object on recent engines and a bare number on old ones
        let total = body
            .get("hits")
            .and_then(|h| h.get("total"))
            .and_then(|t| t.get("value").and_then(Value::as_u64).or_else(|| t.as_u64()))
            .unwrap_or(hits.len() as u64);

        let hits = hits
            .iter()
            .map(Self::parse_hit)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResponse { hits, total })
    }

    /// Parse a single hit. `_id` is required; a missing `_source` is an empty document.
    fn parse_hit(hit: &Value) -> Result<EngineHit, SearchError> {
        let id = hit
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::parse("Search hit has no _id"))?;

        let source = match hit.get("_source") {
            Some(Value::Object(map)) => map.clone(),
            _ => IndexDocument::new(),
        };

        Ok(EngineHit {
            id: id.to_string(),
            score: hit.get("_score").and_then(Value::as_f64),
            source,
        })
    }

    /// Read the `result` field of a write response.
    fn parse_write_result(body: &Value) -> Result<WriteOutcome, SearchError> {
        body.get("result")
            .and_then(Value::as_str)
            .map(WriteOutcome::from_engine_result)
            .ok_or_else(|| SearchError::parse("Index response has no result field"))
    }

    /// Whether a response reports that the index (or document) is absent.
    fn is_not_found(response: &Response) -> bool {
        response.status_code() == StatusCode::NOT_FOUND
    }

    /// Turn a non-success response into an error built by `make_error`.
    async fn check_status(
        response: Response,
        operation: &str,
        make_error: fn(String) -> SearchError,
    ) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "OpenSearch request failed");
        Err(make_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self), fields(index = INDEX_NAME))]
    async fn index_exists(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchError::query(format!(
                "Index existence check returned status {}",
                status
            ))),
        }
    }

    #[instrument(skip(self), fields(index = INDEX_NAME))]
    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        if self.index_exists().await? {
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %self.index_name, "Created search index");
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();

        // Another writer created it between the existence check and the create
        if error_body.contains("resource_already_exists_exception") {
            debug!(index = %self.index_name, "Index created concurrently");
            return Ok(());
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(SearchError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    #[instrument(skip(self, query), fields(index = INDEX_NAME, limit = query.limit))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let body = build_search_query(query);

        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_name]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        // The index can be dropped between the existence check and the query
        if Self::is_not_found(&response) {
            debug!("Index not found during search, returning no hits");
            return Ok(SearchResponse::empty());
        }

        let response = Self::check_status(response, "Search", SearchError::QueryError).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let parsed = Self::parse_search_response(&body)?;
        debug!(hits = parsed.hits.len(), total = parsed.total, "Search completed");
        Ok(parsed)
    }

    #[instrument(skip(self, document), fields(index = INDEX_NAME))]
    async fn index_document(
        &self,
        id: &str,
        document: &IndexDocument,
    ) -> Result<WriteOutcome, SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_name, id))
            .refresh(Refresh::True)
            .body(document)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let response = Self::check_status(response, "Index", SearchError::IndexError).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let outcome = Self::parse_write_result(&body)?;
        debug!(doc_id = %id, outcome = ?outcome, "Document indexed");
        Ok(outcome)
    }

    #[instrument(skip(self), fields(index = INDEX_NAME))]
    async fn get_document(&self, id: &str) -> Result<Option<IndexDocument>, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_name, id))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        // 404 covers both a missing document and a missing index
        if Self::is_not_found(&response) {
            return Ok(None);
        }

        let response = Self::check_status(response, "Get", SearchError::QueryError).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        if !body.get("found").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(None);
        }

        match body.get("_source") {
            Some(Value::Object(source)) => Ok(Some(source.clone())),
            _ => Err(SearchError::parse(format!("Document {} has no _source", id))),
        }
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}
