//! Port definitions (interfaces) for the application layer
//!
//! Ports are implemented by adapters in the infrastructure and presentation
//! layers.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
