//! OpenSearch index configuration and mappings.
//!
//! This module defines the fixed field mapping applied when the index is
//! created on first write.

use serde_json::{json, Value};

/// The name of the search index.
pub const INDEX_NAME: &str = "financial_data";

/// Get the mappings for the document index.
///
/// - **text**: `title`, `description`, `content` for full-text matching
/// - **keyword**: `type`, `url` for exact-term filtering
/// - **date**: `created_at`, `updated_at`
/// - **object**: `metadata`, left open
pub fn get_index_settings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": { "type": "text" },
                "description": { "type": "text" },
                "content": { "type": "text" },
                "type": { "type": "keyword" },
                "created_at": { "type": "date" },
                "updated_at": { "type": "date" },
                "url": { "type": "keyword" },
                "metadata": { "type": "object" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_FIELDS: [&str; 8] = [
        "title",
        "description",
        "content",
        "type",
        "created_at",
        "updated_at",
        "url",
        "metadata",
    ];

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        // Every conventional document field is mapped
        for field in DOCUMENT_FIELDS {
            assert!(properties[field].is_object(), "missing mapping for {}", field);
        }

        assert_eq!(properties["title"]["type"], "text");
        assert_eq!(properties["content"]["type"], "text");
        assert_eq!(properties["type"]["type"], "keyword");
        assert_eq!(properties["url"]["type"], "keyword");
        assert_eq!(properties["created_at"]["type"], "date");
        assert_eq!(properties["metadata"]["type"], "object");
    }

    #[test]
    fn test_index_name() {
        assert_eq!(INDEX_NAME, "financial_data");
    }
}
