//! # Search Service Shared
//!
//! Data types shared by the search service crates: the query model, filter
//! representations, the engine hit/response model, the normalized
//! `SearchResult` and the open-ended index document.

mod document;
mod filter;
mod query;
mod result;
pub mod timestamp;

pub use document::IndexDocument;
pub use filter::{FilterOperator, FilterToken, ParseOperatorError, SearchFilter};
pub use query::{SearchQuery, DEFAULT_LIMIT};
pub use result::{EngineHit, SearchResponse, SearchResult};
