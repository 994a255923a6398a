//! Error types for the Gemini adapter

use thiserror::Error;
use wiki_application::GatewayError;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("No content in response")]
    EmptyResponse,

    #[error("Malformed stream frame: {0}")]
    MalformedFrame(String),
}

impl GeminiError {
    /// Whether the API rejected the key itself.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            GeminiError::Api { status, message } => {
                matches!(status, 401 | 403) || message.contains("API key not valid")
            }
            _ => false,
        }
    }
}

impl From<GeminiError> for GatewayError {
    fn from(error: GeminiError) -> Self {
        if error.is_auth_failure() {
            return GatewayError::Authentication(error.to_string());
        }
        match error {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::Api { .. } => GatewayError::RequestFailed(error.to_string()),
            GeminiError::SerializationError(_)
            | GeminiError::Blocked(_)
            | GeminiError::EmptyResponse
            | GeminiError::MalformedFrame(_) => GatewayError::InvalidResponse(error.to_string()),
        }
    }
}
