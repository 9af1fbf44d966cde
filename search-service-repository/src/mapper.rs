//! Maps engine hits to normalized search results.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::errors::SearchError;
use search_service_shared::timestamp::parse_timestamp;
use search_service_shared::{EngineHit, IndexDocument, SearchResult};

/// Title used when a stored document has none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Result type used when a stored document has none.
pub const DEFAULT_TYPE: &str = "document";

/// Map engine hits to search results, preserving engine order.
///
/// `now` fills in missing timestamps. A timestamp that is present but cannot
/// be parsed fails the whole mapping.
pub fn map_hits(hits: Vec<EngineHit>, now: DateTime<Utc>) -> Result<Vec<SearchResult>, SearchError> {
    hits.into_iter().map(|hit| map_hit(hit, now)).collect()
}

/// Map a single engine hit.
pub fn map_hit(hit: EngineHit, now: DateTime<Utc>) -> Result<SearchResult, SearchError> {
    let source = &hit.source;

    let created_at = timestamp_field(source, "created_at", &hit.id)?.unwrap_or(now);
    let updated_at = timestamp_field(source, "updated_at", &hit.id)?.unwrap_or(now);

    let metadata = match source.get("metadata") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    Ok(SearchResult {
        title: string_field(source, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: string_field(source, "description"),
        result_type: string_field(source, "type").unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        score: hit.score.unwrap_or(0.0),
        created_at,
        updated_at,
        url: string_field(source, "url"),
        metadata: Some(metadata),
        id: hit.id,
    })
}

fn string_field(source: &IndexDocument, key: &str) -> Option<String> {
    source.get(key).and_then(Value::as_str).map(str::to_string)
}

fn timestamp_field(
    source: &IndexDocument,
    key: &str,
    doc_id: &str,
) -> Result<Option<DateTime<Utc>>, SearchError> {
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            SearchError::parse(format!(
                "Invalid {} '{}' on document {}",
                key, raw, doc_id
            ))
        }),
        Some(other) => Err(SearchError::parse(format!(
            "Invalid {} {} on document {}",
            key, other, doc_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn source(value: Value) -> IndexDocument {
        match value {
            Value::Object(map) => map,
            _ => panic!("source must be an object"),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_map_full_hit() {
        let hit = EngineHit::new(
            "doc-1",
            2.5,
            source(json!({
                "title": "Fund prospectus",
                "description": "Annual fund prospectus",
                "type": "report",
                "created_at": "2024-01-15T09:00:00Z",
                "updated_at": "2024-02-15T09:00:00",
                "url": "/docs/prospectus",
                "metadata": { "region": "emea" }
            })),
        );

        let result = map_hit(hit, fixed_now()).unwrap();

        assert_eq!(result.id, "doc-1");
        assert_eq!(result.title, "Fund prospectus");
        assert_eq!(result.description.as_deref(), Some("Annual fund prospectus"));
        assert_eq!(result.result_type, "report");
        assert_eq!(result.score, 2.5);
        assert_eq!(
            result.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
        );
        assert_eq!(
            result.updated_at,
            Utc.with_ymd_and_hms(2024, 2, 15, 9, 0, 0).unwrap()
        );
        assert_eq!(result.url.as_deref(), Some("/docs/prospectus"));
        assert_eq!(result.metadata.unwrap()["region"], "emea");
    }

    #[test]
    fn test_map_minimal_hit_applies_defaults() {
        let hit = EngineHit::new("doc-2", 0.7, IndexDocument::new());
        let result = map_hit(hit, fixed_now()).unwrap();

        assert_eq!(result.title, DEFAULT_TITLE);
        assert_eq!(result.result_type, DEFAULT_TYPE);
        assert!(result.description.is_none());
        assert!(result.url.is_none());
        assert_eq!(result.created_at, fixed_now());
        assert_eq!(result.updated_at, fixed_now());
        assert!(result.metadata.unwrap().is_empty());
    }

    #[test]
    fn test_map_null_timestamp_is_absent() {
        let hit = EngineHit::new("doc-3", 1.0, source(json!({ "created_at": null })));
        let result = map_hit(hit, fixed_now()).unwrap();
        assert_eq!(result.created_at, fixed_now());
    }

    #[test]
    fn test_map_missing_score() {
        let hit = EngineHit {
            id: "doc-4".to_string(),
            score: None,
            source: IndexDocument::new(),
        };
        assert_eq!(map_hit(hit, fixed_now()).unwrap().score, 0.0);
    }

    #[test]
    fn test_map_malformed_timestamp_fails() {
        let hit = EngineHit::new("doc-5", 1.0, source(json!({ "updated_at": "last tuesday" })));
        let err = map_hit(hit, fixed_now()).unwrap_err();
        assert!(matches!(err, SearchError::ParseError(_)));

        let hit = EngineHit::new("doc-6", 1.0, source(json!({ "created_at": 1700000000 })));
        assert!(map_hit(hit, fixed_now()).is_err());
    }

    #[test]
    fn test_map_hits_preserves_order() {
        let hits = vec![
            EngineHit::new("a", 3.0, IndexDocument::new()),
            EngineHit::new("b", 2.0, IndexDocument::new()),
            EngineHit::new("c", 2.5, IndexDocument::new()),
        ];

        let results = map_hits(hits, fixed_now()).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_map_hits_one_bad_hit_fails_all() {
        let hits = vec![
            EngineHit::new("a", 3.0, IndexDocument::new()),
            EngineHit::new("b", 2.0, source(json!({ "created_at": "not a date" }))),
        ];
        assert!(map_hits(hits, fixed_now()).is_err());
    }
}
