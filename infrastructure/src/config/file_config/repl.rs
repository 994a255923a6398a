//! REPL configuration from TOML (`[repl]` section)

use super::logging::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "wiki";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the spinner while a query is loading
    pub show_progress: bool,
    /// Label shown before the input cursor
    pub prompt: String,
    /// History file; `~/` is expanded. Defaults to the user data dir.
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            prompt: DEFAULT_PROMPT.to_string(),
            history_file: None,
        }
    }
}

impl FileReplConfig {
    /// Where REPL history lives, or `None` if no location is known.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|dir| dir.join("ascii-wiki").join("history.txt")),
        }
    }
}
