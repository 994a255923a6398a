//! Gemini REST adapter.
//!
//! - [`gateway::GeminiLlmGateway`] implements the `LlmGateway` port
//! - [`protocol`] holds the `generateContent` wire types
//! - [`gateway::pump_sse`] turns `streamGenerateContent?alt=sse` bodies into stream events

pub mod error;
pub mod gateway;
pub mod protocol;
