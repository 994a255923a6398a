//! Query defaults from TOML (`[query]` section)

use serde::{Deserialize, Serialize};
use wiki_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_LANGUAGE, canonical_language};

pub const DEFAULT_INITIAL_TOPIC: &str = "Wiki";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// Language definitions are written in
    pub language: String,
    /// Topic submitted when the REPL starts
    pub initial_topic: String,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            initial_topic: DEFAULT_INITIAL_TOPIC.to_string(),
        }
    }
}

impl FileQueryConfig {
    /// Canonical spelling of the language, or the raw value plus a warning.
    ///
    /// Unknown languages are still passed through to prompts.
    pub fn parse_language(&self) -> (String, Vec<ConfigIssue>) {
        match canonical_language(&self.language) {
            Some(name) => (name.to_string(), Vec::new()),
            None => (
                self.language.trim().to_string(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownLanguage {
                        value: self.language.clone(),
                    },
                    format!(
                        "query.language: '{}' is not in the supported list; using it as-is",
                        self.language
                    ),
                )],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_canonicalized() {
        let config = FileQueryConfig {
            language: "french".to_string(),
            ..Default::default()
        };
        let (language, issues) = config.parse_language();
        assert_eq!(language, "French");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_language_passes_through_with_warning() {
        let config = FileQueryConfig {
            language: "Klingon".to_string(),
            ..Default::default()
        };
        let (language, issues) = config.parse_language();
        assert_eq!(language, "Klingon");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, wiki_domain::Severity::Warning);
    }
}
