//! Per-branch model selection from TOML (`[models]` section)

use serde::{Deserialize, Serialize};
use wiki_domain::{ConfigIssue, ConfigIssueCode, Model, ModelConfig};

/// Model ids for each branch.
///
/// # Example
///
/// ```toml
/// [models]
/// definition = "gemini-2.5-flash"
/// artifact = "gemini-2.5-pro"
/// suggestion = "gemini-2.5-flash-lite"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model streaming the definition text
    pub definition: Option<String>,
    /// Model producing the ASCII artifact
    pub artifact: Option<String>,
    /// Model suggesting random topics
    pub suggestion: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => {
                // Unknown names become Model::Custom
                let Ok(model) = s.trim().parse::<Model>();
                (Some(model), Vec::new())
            }
        }
    }

    /// Resolve into a [`ModelConfig`], keeping defaults for unset or empty fields.
    pub fn to_model_config(&self) -> (ModelConfig, Vec<ConfigIssue>) {
        let mut config = ModelConfig::default();
        let mut issues = Vec::new();

        let (definition, found) = Self::parse_single_model("definition", self.definition.as_ref());
        issues.extend(found);
        if let Some(model) = definition {
            config = config.with_definition(model);
        }

        let (artifact, found) = Self::parse_single_model("artifact", self.artifact.as_ref());
        issues.extend(found);
        if let Some(model) = artifact {
            config = config.with_artifact(model);
        }

        let (suggestion, found) = Self::parse_single_model("suggestion", self.suggestion.as_ref());
        issues.extend(found);
        if let Some(model) = suggestion {
            config = config.with_suggestion(model);
        }

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_models_use_defaults() {
        let (config, issues) = FileModelsConfig::default().to_model_config();
        assert_eq!(config, ModelConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_known_and_custom_models() {
        let models = FileModelsConfig {
            artifact: Some("gemini-2.5-pro".to_string()),
            definition: Some("my-tuned-model".to_string()),
            suggestion: None,
        };
        let (config, issues) = models.to_model_config();
        assert_eq!(config.artifact, Model::Gemini25Pro);
        assert_eq!(config.definition, Model::Custom("my-tuned-model".to_string()));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_model_name_reported() {
        let models = FileModelsConfig {
            artifact: Some("  ".to_string()),
            ..Default::default()
        };
        let (config, issues) = models.to_model_config();
        assert_eq!(config.artifact, Model::Gemini25Flash);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyModelName {
                field: "artifact".to_string()
            }
        );
    }
}
