//! Query value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Monotonic identity of a submitted query.
///
/// Issued by the orchestrator; a larger id always belongs to a later
/// submission. Results carry the id of the query that produced them so
/// they can be checked against the live query before publishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryId(u64);

impl QueryId {
    /// Id used by the idle state before anything was submitted.
    pub const NONE: QueryId = QueryId(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A user search (Value Object)
///
/// Created on submission and never mutated; the next submission replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    language: String,
}

impl Query {
    /// Create a query, trimming the topic.
    ///
    /// Fails if the topic or the language is blank.
    pub fn try_new(
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into().trim().to_string();
        let language = language.into().trim().to_string();
        if text.is_empty() {
            return Err(DomainError::InvalidQuery("topic cannot be empty".to_string()));
        }
        if language.is_empty() {
            return Err(DomainError::InvalidQuery(
                "language cannot be empty".to_string(),
            ));
        }
        Ok(Self { text, language })
    }

    /// The topic being defined
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The language the definition should be written in
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.text, self.language)
    }
}
