//! # Search Service Repository
//!
//! This crate provides the engine-facing logic of the search service: the
//! `SearchEngineClient` interface, a concrete implementation for OpenSearch,
//! the result mapper, document preparation for upserts and the
//! `SearchService` that ties them together.

pub mod config;
pub mod document;
pub mod errors;
pub mod interfaces;
pub mod mapper;
pub mod opensearch;
pub mod placeholder;
pub mod service;
pub mod types;

pub use config::{EngineConfig, FallbackPolicy, SearchServiceConfig};
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use service::{filters_to_tokens, SearchService};
pub use types::{SearchOutcome, WriteOutcome};
