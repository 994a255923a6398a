//! Generation parameters — per-branch call control.
//!
//! [`GenerationParams`] groups the static knobs the query branches read:
//! how many artifact attempts to make, and whether each call asks the
//! model for minimal reasoning. These are application-layer concerns, not
//! domain policy.

use serde::{Deserialize, Serialize};

/// Default number of artifact generation attempts before falling back.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Artifact branch control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactParams {
    /// Total gateway calls before the deterministic fallback is used.
    pub max_attempts: u32,
    /// Let the model think before answering. Off means a zero thinking budget.
    pub enable_thinking: bool,
    /// Ask for (and keep) a short caption alongside the art.
    pub include_caption: bool,
}

impl Default for ArtifactParams {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            enable_thinking: false,
            include_caption: false,
        }
    }
}

/// Definition branch control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionParams {
    pub enable_thinking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub artifact: ArtifactParams,
    pub definition: DefinitionParams,
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.artifact.max_attempts = attempts;
        self
    }

    pub fn with_artifact_thinking(mut self, enabled: bool) -> Self {
        self.artifact.enable_thinking = enabled;
        self
    }

    pub fn with_caption(mut self, enabled: bool) -> Self {
        self.artifact.include_caption = enabled;
        self
    }

    pub fn with_definition_thinking(mut self, enabled: bool) -> Self {
        self.definition.enable_thinking = enabled;
        self
    }

    /// Attempt count actually used: a zero setting still makes one call.
    pub fn effective_attempts(&self) -> u32 {
        self.artifact.max_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let params = GenerationParams::default();
        assert_eq!(params.artifact.max_attempts, 3);
        assert!(!params.artifact.enable_thinking);
        assert!(!params.artifact.include_caption);
        assert!(!params.definition.enable_thinking);
    }

    #[test]
    fn builders_chain() {
        let params = GenerationParams::default()
            .with_max_attempts(5)
            .with_caption(true)
            .with_definition_thinking(true);
        assert_eq!(params.artifact.max_attempts, 5);
        assert!(params.artifact.include_caption);
        assert!(params.definition.enable_thinking);
    }

    #[test]
    fn zero_attempts_still_makes_one_call() {
        let params = GenerationParams::default().with_max_attempts(0);
        assert_eq!(params.effective_attempts(), 1);
    }
}
