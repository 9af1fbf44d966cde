//! Result types for search and index operations.

use search_service_shared::SearchResult;

/// Outcome of a search on the read path.
///
/// `Degraded` results are placeholders produced while the engine was failing;
/// they never come from the index.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Genuine results from the engine.
    Results(Vec<SearchResult>),
    /// Placeholder results, with the failure that caused the substitution.
    Degraded {
        results: Vec<SearchResult>,
        cause: String,
    },
}

impl SearchOutcome {
    pub fn results(&self) -> &[SearchResult] {
        match self {
            Self::Results(results) => results,
            Self::Degraded { results, .. } => results,
        }
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Results(results) => results,
            Self::Degraded { results, .. } => results,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The failure behind a degraded outcome.
    pub fn degraded_cause(&self) -> Option<&str> {
        match self {
            Self::Results(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// Result reported by the engine for a single-document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    /// Any other engine result (`noop`, `not_found`, ...).
    Other(String),
}

impl WriteOutcome {
    /// Map the engine's `result` field.
    pub fn from_engine_result(result: &str) -> Self {
        match result {
            "created" => Self::Created,
            "updated" => Self::Updated,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the document was created or overwritten.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}
