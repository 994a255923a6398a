//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types on demand.

mod artifact;
mod definition;
mod gemini;
mod logging;
mod models;
mod output;
mod query;
mod repl;

pub use artifact::FileArtifactConfig;
pub use definition::FileDefinitionConfig;
pub use gemini::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileGeminiConfig};
pub use logging::{FileLoggingConfig, expand_home};
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use query::{DEFAULT_INITIAL_TOPIC, FileQueryConfig};
pub use repl::{DEFAULT_PROMPT, FileReplConfig};

use serde::{Deserialize, Serialize};
use wiki_application::GenerationParams;
use wiki_domain::{ConfigIssue, ConfigIssueCode, ModelConfig};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-branch model selection
    pub models: FileModelsConfig,
    /// Gemini endpoint, credential source and timeouts
    pub gemini: FileGeminiConfig,
    /// Artifact branch settings
    pub artifact: FileArtifactConfig,
    /// Definition branch settings
    pub definition: FileDefinitionConfig,
    /// Query defaults
    pub query: FileQueryConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty model names
    /// 2. Unknown definition language
    /// 3. `artifact.max_attempts == 0`
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.models.to_model_config().1);
        issues.extend(self.query.parse_language().1);

        if self.artifact.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "artifact.max_attempts: must be at least 1; one attempt will be made",
            ));
        }

        issues
    }

    pub fn model_config(&self) -> ModelConfig {
        self.models.to_model_config().0
    }

    pub fn language(&self) -> String {
        self.query.parse_language().0
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            artifact: self.artifact.to_params(),
            definition: self.definition.to_params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_domain::{Model, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[models]
definition = "gemini-2.5-flash-lite"
artifact = "gemini-2.5-pro"

[gemini]
api_key_env = "MY_GEMINI_KEY"
connect_timeout_secs = 5

[artifact]
max_attempts = 5
include_caption = true

[definition]
enable_thinking = true

[query]
language = "Japanese"
initial_topic = "Haiku"

[output]
color = false

[repl]
show_progress = false
prompt = "ask"
history_file = "~/.local/share/ascii-wiki/history.txt"

[logging]
transcript = "/tmp/ascii-wiki.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model_config().definition, Model::Gemini25FlashLite);
        assert_eq!(config.model_config().artifact, Model::Gemini25Pro);
        assert_eq!(config.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.gemini.connect_timeout_secs, 5);
        assert_eq!(config.gemini.request_timeout_secs, 120);
        assert_eq!(config.artifact.max_attempts, 5);
        assert!(config.artifact.include_caption);
        assert!(config.definition.enable_thinking);
        assert_eq!(config.language(), "Japanese");
        assert_eq!(config.query.initial_topic, "Haiku");
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.repl.prompt, "ask");
        assert_eq!(
            config.logging.transcript_path(),
            Some(std::path::PathBuf::from("/tmp/ascii-wiki.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[artifact]
enable_thinking = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.artifact.enable_thinking);
        // Defaults should apply
        assert_eq!(config.artifact.max_attempts, 3);
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.query.language, "English");
        assert_eq!(config.query.initial_topic, "Wiki");
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.model_config(), ModelConfig::default());
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gemini.connect_timeout_secs, 30);
        assert!(config.gemini.api_key.is_none());
        assert!(config.logging.transcript.is_none());
        assert_eq!(config.generation_params(), GenerationParams::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[models]
definition = ""

[artifact]
max_attempts = 0

[query]
language = "Elvish"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::ZeroAttempts));
        assert!(issues.iter().any(|i| matches!(
            i.code,
            ConfigIssueCode::UnknownLanguage { .. }
        ) && i.severity == Severity::Warning));
        assert!(issues.iter().any(|i| matches!(
            i.code,
            ConfigIssueCode::EmptyModelName { .. }
        ) && i.severity == Severity::Error));
    }
}
