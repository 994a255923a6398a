//! Generate Artifact use case.
//!
//! Requests an ASCII illustration for a topic as a single-shot JSON call,
//! retrying on transport or payload failures. When every attempt fails the
//! deterministic boxed fallback is returned instead, so this use case never
//! surfaces an error to its caller.

use crate::config::ArtifactParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GenerationOptions, GenerationRequest, LlmGateway};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wiki_domain::{
    ArtifactResult, Credential, DomainError, Model, PromptTemplate, fallback_artifact,
    parse_artifact_payload,
};

/// Use case for producing the artifact of one query.
#[derive(Clone)]
pub struct GenerateArtifactUseCase {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    params: ArtifactParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerateArtifactUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: ArtifactParams) -> Self {
        Self {
            gateway,
            model,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn request(&self, topic: &str, language: &str) -> GenerationRequest {
        let prompt = PromptTemplate::artifact(topic, language, self.params.include_caption);
        GenerationRequest::new(self.model.clone(), prompt).with_options(
            GenerationOptions::default()
                .with_json_output(true)
                .with_minimal_thinking(!self.params.enable_thinking),
        )
    }

    /// Make one gateway call and validate its payload.
    pub async fn attempt(
        &self,
        topic: &str,
        language: &str,
        credential: &Credential,
    ) -> Result<ArtifactResult, DomainError> {
        let request = self.request(topic, language);
        let raw = self.gateway.generate(credential, &request).await?;
        parse_artifact_payload(&raw, self.params.include_caption)
    }

    /// Produce an artifact, falling back after the configured attempts.
    pub async fn execute(
        &self,
        topic: &str,
        language: &str,
        credential: &Credential,
    ) -> ArtifactResult {
        match self.generate_with_retries(topic, language, credential).await {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!("Artifact generation for '{}' gave up: {}", topic, err);
                self.conversation_logger.log(ConversationEvent::new(
                    "artifact_fallback",
                    json!({ "topic": topic, "error": err.to_string() }),
                ));
                fallback_artifact(topic)
            }
        }
    }

    /// Retry loop without the fallback: `Exhausted` after the last failure.
    pub async fn generate_with_retries(
        &self,
        topic: &str,
        language: &str,
        credential: &Credential,
    ) -> Result<ArtifactResult, DomainError> {
        let max_attempts = self.params.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            debug!(
                "Artifact attempt {}/{} for '{}' with {}",
                attempt, max_attempts, topic, self.model
            );
            match self.attempt(topic, language, credential).await {
                Ok(artifact) => {
                    info!("Artifact for '{}' generated on attempt {}", topic, attempt);
                    self.conversation_logger.log(ConversationEvent::new(
                        "artifact_generated",
                        json!({
                            "topic": topic,
                            "attempt": attempt,
                            "model": self.model.to_string(),
                        }),
                    ));
                    return Ok(artifact);
                }
                Err(err) => {
                    warn!(
                        "Artifact attempt {}/{} for '{}' failed: {}",
                        attempt, max_attempts, topic, err
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "artifact_attempt_failed",
                        json!({
                            "topic": topic,
                            "attempt": attempt,
                            "error": err.to_string(),
                        }),
                    ));
                    last_error = Some(err);
                }
            }
        }

        Err(DomainError::Exhausted {
            attempts: max_attempts,
            last_error: last_error.map(|e| e.detail()).unwrap_or_default(),
        })
    }
}
