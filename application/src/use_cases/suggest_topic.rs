//! Suggest Topic use case.
//!
//! Asks the model for a single random word or concept. Unlike the query
//! branches this one reports failures to the caller, which typically falls
//! back to the curated topic list.

use crate::ports::llm_gateway::{GatewayError, GenerationOptions, GenerationRequest, LlmGateway};
use std::sync::Arc;
use tracing::debug;
use wiki_domain::{Credential, Model, PromptTemplate};

pub struct SuggestTopicUseCase {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl SuggestTopicUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }

    pub async fn execute(
        &self,
        language: &str,
        credential: &Credential,
    ) -> Result<String, GatewayError> {
        let request = GenerationRequest::new(self.model.clone(), PromptTemplate::random_topic(language))
            .with_options(GenerationOptions::default().with_minimal_thinking(true));
        let raw = self.gateway.generate(credential, &request).await?;
        let topic = clean_suggestion(&raw);
        if topic.is_empty() {
            return Err(GatewayError::InvalidResponse(
                "model returned an empty topic".to_string(),
            ));
        }
        debug!("Model suggested topic '{}'", topic);
        Ok(topic)
    }
}

/// First non-empty line, without surrounding quotes or a trailing period.
fn clean_suggestion(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '\'' || c == '*')
        .trim_end_matches('.')
        .trim()
        .to_string()
}
