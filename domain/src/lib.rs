//! Domain layer for ascii-wiki
//!
//! This crate contains the core value objects and rules. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! A [`Query`] (topic + language) fans out into two branches:
//!
//! - **Artifact**: an ASCII illustration, parsed from a JSON payload
//!   ([`parse_artifact_payload`]) or synthesized locally
//!   ([`fallback_artifact`]) when the gateway keeps failing.
//! - **Definition**: a single paragraph streamed as text fragments.
//!
//! Their progress is folded into one [`QuerySnapshot`] per live query.

pub mod artifact;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod session;
pub mod vocabulary;

// Re-export commonly used types
pub use artifact::{
    entities::{ArtifactResult, ArtifactSource},
    fallback::fallback_artifact,
    payload::parse_artifact_payload,
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use crate::core::{
    credential::Credential,
    error::DomainError,
    model::Model,
    model_config::ModelConfig,
    query::{Query, QueryId},
};
pub use orchestration::{
    snapshot::{CONTENT_FAILURE_MESSAGE, QuerySnapshot},
    state::{BranchStatus, QueryRunState, RunPhase},
};
pub use prompt::PromptTemplate;
pub use session::stream::StreamEvent;
pub use vocabulary::{
    DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES, canonical_language, curated_topics, pick_random_topic,
};
