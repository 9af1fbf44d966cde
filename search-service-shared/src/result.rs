//! Engine hits and normalized search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::IndexDocument;

/// One matched document as returned by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineHit {
    /// Engine-assigned document id.
    pub id: String,
    /// Relevance score. The engine omits it in some query modes.
    pub score: Option<f64>,
    /// The stored document.
    pub source: IndexDocument,
}

impl EngineHit {
    pub fn new(id: impl Into<String>, score: f64, source: IndexDocument) -> Self {
        Self {
            id: id.into(),
            score: Some(score),
            source,
        }
    }
}

/// Hits for a single query, in engine order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    pub hits: Vec<EngineHit>,
    /// Total number of matching documents reported by the engine.
    pub total: u64,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A normalized search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub result_type: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_serializes_type_field() {
        let now = Utc::now();
        let result = SearchResult {
            id: "doc-1".to_string(),
            title: "Quarterly report".to_string(),
            description: None,
            result_type: "document".to_string(),
            score: 1.25,
            created_at: now,
            updated_at: now,
            url: None,
            metadata: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "document");
        assert_eq!(value["score"], json!(1.25));
        assert!(value.get("description").is_none());
        assert!(value.get("result_type").is_none());
    }
}
