//! Presentation layer for ascii-wiki
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::{OutputConfig, OutputMode, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::live::{follow_definition, wait_settled};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
