//! Terminal settings resolved from CLI flags and the config file.

use std::path::PathBuf;

/// How a one-shot lookup is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Stream the definition as it arrives, then draw the artifact.
    #[default]
    Live,
    /// Wait for the query to settle and print one JSON document.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Live,
            color: true,
        }
    }
}

impl OutputConfig {
    pub fn new(json: bool, color: bool) -> Self {
        let mode = if json { OutputMode::Json } else { OutputMode::Live };
        Self { mode, color }
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Turn off ANSI styling process-wide when color is disabled.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// Settings for [`ChatRepl`](crate::ChatRepl).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Prompt label
    pub prompt: String,
    /// History file; no history is kept when `None`
    pub history_file: Option<PathBuf>,
    /// Looked up on start when an API key is available
    pub initial_topic: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "wiki".to_string(),
            history_file: None,
            initial_topic: None,
        }
    }
}
