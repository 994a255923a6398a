//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ascii-wiki
#[derive(Parser, Debug)]
#[command(name = "ascii-wiki")]
#[command(author, version, about = "A terminal encyclopedia: every word defined, every topic drawn in ASCII")]
#[command(long_about = r#"
ascii-wiki looks up a topic and answers with two things at once:

1. A one-paragraph definition, streamed as it is written
2. An ASCII-art illustration of the topic

If the illustration cannot be produced, a boxed placeholder is shown instead.

The Gemini API key is read from (in priority order):
1. --api-key <KEY>
2. [gemini] api_key in a config file
3. the environment variable named by [gemini] api_key_env (GEMINI_API_KEY)

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./ascii-wiki.toml        Project-level config
3. ~/.config/ascii-wiki/config.toml   Global config

Example:
  ascii-wiki Entropy
  ascii-wiki -l French "Joie de vivre"
  ascii-wiki --random --json
  ascii-wiki --chat
"#)]
pub struct Cli {
    /// The topic to look up (not required with --random, --suggest or --chat)
    pub topic: Option<String>,

    /// Look up a topic picked from the curated list
    #[arg(long, conflicts_with_all = ["topic", "suggest"])]
    pub random: bool,

    /// Ask the model for a random topic (falls back to --random behavior)
    #[arg(long, conflicts_with = "topic")]
    pub suggest: bool,

    /// Language of the definition (default from config, else English)
    #[arg(short, long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Print the settled result as JSON instead of streaming text
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Gemini API key (overrides config and environment)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_topic_and_language() {
        let cli = Cli::parse_from(["ascii-wiki", "-l", "French", "Joie de vivre"]);
        assert_eq!(cli.topic.as_deref(), Some("Joie de vivre"));
        assert_eq!(cli.language.as_deref(), Some("French"));
        assert!(!cli.random);
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["ascii-wiki", "-vv", "--random"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.random);
    }

    #[test]
    fn test_random_conflicts_with_topic() {
        assert!(Cli::try_parse_from(["ascii-wiki", "--random", "Flux"]).is_err());
    }
}
