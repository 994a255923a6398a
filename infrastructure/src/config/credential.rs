//! API key resolution.
//!
//! The key is looked up once at startup and handed to the orchestrator;
//! nothing here caches it.

use super::file_config::FileGeminiConfig;
use std::fmt;
use wiki_domain::Credential;

/// Where the resolved key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    ConfigFile,
    Environment(String),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Flag => write!(f, "--api-key"),
            CredentialSource::ConfigFile => write!(f, "config file"),
            CredentialSource::Environment(name) => write!(f, "${}", name),
        }
    }
}

/// Resolve the key: `--api-key` flag, then `[gemini] api_key`, then the
/// environment variable named by `api_key_env`. Blank values are skipped.
pub fn resolve_credential(
    flag: Option<&str>,
    config: &FileGeminiConfig,
) -> Option<(Credential, CredentialSource)> {
    resolve_credential_with(flag, config, |name| std::env::var(name).ok())
}

/// Same as [`resolve_credential`] with an injectable environment lookup.
pub fn resolve_credential_with(
    flag: Option<&str>,
    config: &FileGeminiConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Option<(Credential, CredentialSource)> {
    if let Some(credential) = flag.and_then(Credential::try_new) {
        return Some((credential, CredentialSource::Flag));
    }
    if let Some(credential) = config.api_key.as_deref().and_then(Credential::try_new) {
        return Some((credential, CredentialSource::ConfigFile));
    }
    let name = config.api_key_env.trim();
    if name.is_empty() {
        return None;
    }
    env(name)
        .and_then(Credential::try_new)
        .map(|credential| (credential, CredentialSource::Environment(name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(key: &'static str) -> impl Fn(&str) -> Option<String> {
        move |name| (name == "GEMINI_API_KEY").then(|| key.to_string())
    }

    #[test]
    fn test_flag_wins() {
        let config = FileGeminiConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let (credential, source) =
            resolve_credential_with(Some("from-flag"), &config, env_with("from-env")).unwrap();
        assert_eq!(credential.expose(), "from-flag");
        assert_eq!(source, CredentialSource::Flag);
    }

    #[test]
    fn test_config_before_environment() {
        let config = FileGeminiConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let (credential, source) =
            resolve_credential_with(None, &config, env_with("from-env")).unwrap();
        assert_eq!(credential.expose(), "from-file");
        assert_eq!(source, CredentialSource::ConfigFile);
    }

    #[test]
    fn test_environment_fallback() {
        let (credential, source) =
            resolve_credential_with(None, &FileGeminiConfig::default(), env_with("from-env"))
                .unwrap();
        assert_eq!(credential.expose(), "from-env");
        assert_eq!(source.to_string(), "$GEMINI_API_KEY");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let config = FileGeminiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(resolve_credential_with(Some(""), &config, env_with("  ")).is_none());
    }
}
