//! Role-based model configuration.
//!
//! [`ModelConfig`] picks one model per query branch. It is a static value
//! object: once created, models don't change at runtime.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// # Example
///
/// ```
/// use wiki_domain::{Model, ModelConfig};
///
/// let config = ModelConfig::default().with_artifact(Model::Gemini25Pro);
/// assert_eq!(config.artifact, Model::Gemini25Pro);
/// assert_eq!(config.definition, Model::Gemini25Flash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model that streams the definition text.
    pub definition: Model,
    /// Model that produces the ASCII-art artifact.
    pub artifact: Model,
    /// Model that suggests random topics.
    pub suggestion: Model,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            definition: Model::Gemini25Flash,
            artifact: Model::Gemini25Flash,
            suggestion: Model::Gemini25Flash,
        }
    }
}

impl ModelConfig {
    pub fn with_definition(mut self, model: Model) -> Self {
        self.definition = model;
        self
    }

    pub fn with_artifact(mut self, model: Model) -> Self {
        self.artifact = model;
        self
    }

    pub fn with_suggestion(mut self, model: Model) -> Self {
        self.suggestion = model;
        self
    }
}
