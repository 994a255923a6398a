//! Gemini API configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Raw Gemini configuration from TOML
///
/// # Example
///
/// ```toml
/// [gemini]
/// api_key_env = "GEMINI_API_KEY"
/// connect_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    /// REST endpoint root
    pub base_url: String,
    /// TCP/TLS connect timeout, applied to every call
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for single-shot calls (not streams)
    pub request_timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 30,
            request_timeout_secs: 120,
        }
    }
}
