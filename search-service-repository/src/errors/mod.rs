//! Error types for the search service repository.

mod search_error;

pub use search_error::SearchError;
