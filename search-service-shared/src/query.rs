//! Search query parameters.

use serde::{Deserialize, Serialize};

use crate::filter::FilterToken;

/// Number of results requested when the caller does not specify a limit.
pub const DEFAULT_LIMIT: usize = 10;

/// A free-text search request.
///
/// `filters` holds raw `field:value` tokens exactly as received from the
/// caller; malformed tokens are kept here and dropped when the engine query
/// is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query. Forwarded to the engine as-is, even when empty.
    pub query: String,
    /// Raw filter tokens.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Maximum number of results the engine should return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SearchQuery {
    /// Create a query with no filters and the default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Add a raw `field:value` filter token.
    pub fn with_filter(mut self, token: impl Into<String>) -> Self {
        self.filters.push(token.into());
        self
    }

    /// Replace the filter tokens.
    pub fn with_filters<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The well-formed filter tokens, in the order they were given.
    pub fn filter_tokens(&self) -> Vec<FilterToken> {
        FilterToken::parse_all(&self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let query = SearchQuery::new("bonds");
        assert_eq!(query.query, "bonds");
        assert!(query.filters.is_empty());
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_filter_tokens_skip_malformed() {
        let query = SearchQuery::new("bonds")
            .with_filter("type:report")
            .with_filter("nonsense")
            .with_limit(5);

        let tokens = query.filter_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].field, "type");
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let query: SearchQuery = serde_json::from_str(r#"{"query": "equity"}"#).unwrap();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert!(query.filters.is_empty());
    }
}
