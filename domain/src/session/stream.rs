//! Streaming events for gateway text generation.
//!
//! [`StreamEvent`] represents individual events in a streaming response,
//! enabling real-time display of model output as it's generated.

/// An event in a streaming gateway response.
///
/// Used to bridge infrastructure-level streaming (SSE chunks) to the
/// application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}
