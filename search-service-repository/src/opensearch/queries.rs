//! OpenSearch query builders.
//!
//! This module translates a `SearchQuery` into the OpenSearch query DSL.

use serde_json::{json, Value};

use search_service_shared::{FilterToken, SearchQuery};

/// Fields matched by the free-text clause, with title weighted higher.
pub const SEARCH_FIELDS: [&str; 3] = ["title^2", "description", "content"];

/// Build an OpenSearch search body from a SearchQuery.
///
/// The body carries:
/// - `size` set to the query limit
/// - a `must` clause with a `multi_match` over the weighted text fields
/// - a `filter` stage with one `term` clause per well-formed filter token,
///   attached only when there is at least one
pub fn build_search_query(query: &SearchQuery) -> Value {
    let mut bool_query = json!({
        "must": [build_text_clause(&query.query)]
    });

    let filters = build_filter_clauses(&query.filter_tokens());
    if !filters.is_empty() {
        bool_query["filter"] = Value::Array(filters);
    }

    json!({
        "size": query.limit,
        "query": {
            "bool": bool_query
        }
    })
}

/// Build the free-text clause. The query text is not validated.
fn build_text_clause(query_text: &str) -> Value {
    json!({
        "multi_match": {
            "query": query_text,
            "fields": SEARCH_FIELDS
        }
    })
}

/// Build one exact-term clause per token.
fn build_filter_clauses(tokens: &[FilterToken]) -> Vec<Value> {
    tokens
        .iter()
        .map(|token| {
            let mut term = serde_json::Map::new();
            term.insert(token.field.clone(), Value::String(token.value.clone()));
            json!({ "term": term })
        })
        .collect()
}
