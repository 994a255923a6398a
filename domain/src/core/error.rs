//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are the failure kinds a query branch can run into. None of them
/// escapes the orchestrator: the text branch renders them as a visible
/// fragment, the artifact branch retries and then falls back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    /// Whether another attempt at the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::TransportFailure(_) | DomainError::MalformedPayload(_)
        )
    }

    /// The bare message without the kind prefix, for user-facing text.
    pub fn detail(&self) -> String {
        match self {
            DomainError::TransportFailure(msg)
            | DomainError::MalformedPayload(msg)
            | DomainError::InvalidQuery(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display() {
        let error = DomainError::Exhausted {
            attempts: 3,
            last_error: "bad json".to_string(),
        };
        assert_eq!(error.to_string(), "Gave up after 3 attempts: bad json");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(DomainError::TransportFailure("reset".into()).is_retryable());
        assert!(DomainError::MalformedPayload("no art".into()).is_retryable());
        assert!(!DomainError::MissingCredential.is_retryable());
        assert!(
            !DomainError::Exhausted {
                attempts: 3,
                last_error: String::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_detail_strips_kind_prefix() {
        let error = DomainError::TransportFailure("HTTP 403".to_string());
        assert_eq!(error.detail(), "HTTP 403");
        assert_eq!(
            DomainError::MissingCredential.detail(),
            "API key is not configured"
        );
    }
}
