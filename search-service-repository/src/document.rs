//! Preparation of raw content for indexing.

use chrono::{DateTime, Utc};
use serde_json::Value;

use search_service_shared::timestamp::format_timestamp;
use search_service_shared::IndexDocument;

/// Build the document to store for `content`.
///
/// Content that parses as a JSON object is stored as given. Anything else,
/// including valid JSON that is not an object, is wrapped as plain text
/// under `content` with a synthesized title. Missing or null
/// `created_at`/`updated_at` fields are set to `now`.
pub fn prepare_document(id: &str, content: &str, now: DateTime<Utc>) -> IndexDocument {
    let mut document = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map,
        _ => text_document(id, content),
    };

    let stamp = format_timestamp(now);
    for key in ["created_at", "updated_at"] {
        if document.get(key).map_or(true, Value::is_null) {
            document.insert(key.to_string(), Value::String(stamp.clone()));
        }
    }

    document
}

fn text_document(id: &str, content: &str) -> IndexDocument {
    let mut document = IndexDocument::new();
    document.insert("content".to_string(), Value::String(content.to_string()));
    document.insert("title".to_string(), Value::String(format!("Document {}", id)));
    document
}
