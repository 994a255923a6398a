//! Artifact value objects

use serde::{Deserialize, Serialize};

/// Where an artifact came from.
///
/// Consumers render both the same way; the source only feeds logs and the
/// transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSource {
    /// Parsed from a gateway response.
    Generated,
    /// Synthesized locally after the gateway attempts were exhausted.
    Fallback,
}

/// The illustration shown next to a definition.
///
/// `art` is never empty. Produced once per query and replaced wholesale by
/// the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactResult {
    pub art: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub source: ArtifactSource,
}

impl ArtifactResult {
    /// An artifact parsed from a gateway payload.
    pub fn generated(art: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            art: art.into(),
            caption,
            source: ArtifactSource::Generated,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ArtifactSource::Fallback
    }

    /// Art followed by the caption, the way it is displayed and copied.
    pub fn display_text(&self) -> String {
        match &self.caption {
            Some(caption) => format!("{}\n\n{}", self.art, caption),
            None => self.art.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_without_caption() {
        let artifact = ArtifactResult::generated("/\\", None);
        assert_eq!(artifact.display_text(), "/\\");
        assert!(!artifact.is_fallback());
    }

    #[test]
    fn test_display_text_with_caption() {
        let artifact = ArtifactResult::generated("***", Some("stars".to_string()));
        assert_eq!(artifact.display_text(), "***\n\nstars");
    }
}
