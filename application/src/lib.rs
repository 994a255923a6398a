//! Application layer for ascii-wiki
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ArtifactParams, DefinitionParams, GenerationParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GenerationOptions, GenerationRequest, LlmGateway, StreamHandle},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::generate_artifact::GenerateArtifactUseCase;
pub use use_cases::orchestrate_query::{QueryOrchestrator, QueryTicket};
pub use use_cases::stream_definition::{
    DefinitionStream, MISSING_CREDENTIAL_FRAGMENT, StreamDefinitionUseCase,
};
pub use use_cases::suggest_topic::SuggestTopicUseCase;
