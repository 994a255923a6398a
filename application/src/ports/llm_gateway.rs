//! LLM Gateway port
//!
//! Defines the two operations the remote generation service offers: a
//! streaming text completion and a single-shot (optionally JSON) completion.

use async_trait::async_trait;
use wiki_domain::{Credential, DomainError, Model, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

impl From<GatewayError> for DomainError {
    fn from(error: GatewayError) -> Self {
        DomainError::TransportFailure(error.to_string())
    }
}

/// Per-call generation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Ask the model to skip extended reasoning (zero thinking budget).
    pub minimal_thinking: bool,
    /// Ask for a JSON response body.
    pub json_output: bool,
}

impl GenerationOptions {
    pub fn with_minimal_thinking(mut self, minimal: bool) -> Self {
        self.minimal_thinking = minimal;
        self
    }

    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }
}

/// One prompt addressed to one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: Model,
    pub prompt: String,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the generation
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a streaming completion.
    ///
    /// The returned handle yields `Delta` events in arrival order and ends
    /// with `Completed` or `Error`. An `Err` here means the stream never
    /// opened.
    async fn stream_text(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<StreamHandle, GatewayError>;

    /// Run a single-shot completion and return its text payload.
    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<String, GatewayError>;
}

/// Handle for receiving streaming events from the gateway.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or `None` once the sender is gone.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(full_text)
    }
}
