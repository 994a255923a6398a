//! Artifact branch configuration from TOML (`[artifact]` section)

use serde::{Deserialize, Serialize};
use wiki_application::ArtifactParams;
use wiki_application::config::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArtifactConfig {
    /// Gateway calls before the boxed fallback is used
    pub max_attempts: u32,
    /// Let the model think before drawing
    pub enable_thinking: bool,
    /// Keep the short caption returned next to the art
    pub include_caption: bool,
}

impl Default for FileArtifactConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            enable_thinking: false,
            include_caption: false,
        }
    }
}

impl FileArtifactConfig {
    pub fn to_params(&self) -> ArtifactParams {
        ArtifactParams {
            max_attempts: self.max_attempts,
            enable_thinking: self.enable_thinking,
            include_caption: self.include_caption,
        }
    }
}
