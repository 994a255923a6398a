//! Definition branch configuration from TOML (`[definition]` section)

use serde::{Deserialize, Serialize};
use wiki_application::DefinitionParams;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefinitionConfig {
    /// Let the model think before streaming
    pub enable_thinking: bool,
}

impl FileDefinitionConfig {
    pub fn to_params(&self) -> DefinitionParams {
        DefinitionParams {
            enable_thinking: self.enable_thinking,
        }
    }
}
