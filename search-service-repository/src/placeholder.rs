//! Placeholder results for the degraded read path.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use search_service_shared::SearchResult;

/// Upper bound on the number of placeholder results.
pub const MAX_PLACEHOLDER_RESULTS: usize = 3;

/// Build the placeholder results returned while the engine is failing.
///
/// Produces `min(3, limit)` records whose titles echo `query`, scored
/// 1.0, 0.9, 0.8.
pub fn placeholder_results(query: &str, limit: usize, now: DateTime<Utc>) -> Vec<SearchResult> {
    (0..limit.min(MAX_PLACEHOLDER_RESULTS))
        .map(|i| SearchResult {
            id: format!("result-{}", i),
            title: format!("Search Result {} for '{}'", i, query),
            description: Some(format!(
                "This is a mock search result for the query '{}'",
                query
            )),
            result_type: "document".to_string(),
            score: 1.0 - (i as f64 * 0.1),
            created_at: now,
            updated_at: now,
            url: Some(format!("/documents/result-{}", i)),
            metadata: Some(placeholder_metadata()),
        })
        .collect()
}

fn placeholder_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("tags".to_string(), json!(["finance", "advisory"]));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_count_is_capped() {
        let now = Utc::now();
        assert_eq!(placeholder_results("q", 10, now).len(), 3);
        assert_eq!(placeholder_results("q", 2, now).len(), 2);
        assert!(placeholder_results("q", 0, now).is_empty());
    }

    #[test]
    fn test_placeholder_scores_descend() {
        let results = placeholder_results("bonds", 10, Utc::now());
        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();

        assert!((scores[0] - 1.0).abs() < f64::EPSILON);
        assert!((scores[1] - 0.9).abs() < 1e-9);
        assert!((scores[2] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_placeholder_titles_echo_query() {
        let results = placeholder_results("bonds", 1, Utc::now());
        assert_eq!(results[0].id, "result-0");
        assert_eq!(results[0].title, "Search Result 0 for 'bonds'");
        assert_eq!(results[0].url.as_deref(), Some("/documents/result-0"));
        assert_eq!(
            results[0].metadata.as_ref().unwrap()["tags"],
            json!(["finance", "advisory"])
        );
    }
}
