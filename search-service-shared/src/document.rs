//! Open-ended index document.

use serde_json::{Map, Value};

/// A document as stored in the search index.
///
/// The engine applies its declared field types at write time; beyond that no
/// schema is enforced, so documents are kept as a string-keyed map of JSON
/// values.
pub type IndexDocument = Map<String, Value>;
