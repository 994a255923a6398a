//! Configuration file loading for ascii-wiki
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ASCII_WIKI_*` environment overrides
//! 2. `--config <path>` specified file
//! 3. Project root: `./ascii-wiki.toml` or `./.ascii-wiki.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ascii-wiki/config.toml`
//! 5. Default values

mod credential;
mod file_config;
mod loader;

pub use credential::{CredentialSource, resolve_credential, resolve_credential_with};
pub use file_config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_INITIAL_TOPIC, FileArtifactConfig, FileConfig,
    FileDefinitionConfig, FileGeminiConfig, FileLoggingConfig, FileModelsConfig,
    DEFAULT_PROMPT, FileOutputConfig, FileQueryConfig, FileReplConfig, expand_home,
};
pub use loader::ConfigLoader;
