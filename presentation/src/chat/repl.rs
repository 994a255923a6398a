//! REPL (Read-Eval-Print Loop) for interactive lookups

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::live::{follow_definition, wait_settled};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use wiki_application::{QueryOrchestrator, QueryTicket, SuggestTopicUseCase};
use wiki_domain::{Credential, DomainError, QuerySnapshot, SUPPORTED_LANGUAGES, canonical_language};

const HISTORY_CAPACITY: usize = 1000;

/// A parsed REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: look it up.
    Lookup(String),
    Random,
    Suggest,
    /// `/lang` shows the current language; `/lang X` switches to X.
    Language(Option<String>),
    /// `/key` shows whether a key is set; `/key K` sets it.
    Key(Option<String>),
    ForgetKey,
    Last,
    Json,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Some(ReplCommand::Lookup(line.to_string()));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
            None => (command, None),
        };

        Some(match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "random" | "r" => ReplCommand::Random,
            "suggest" | "s" => ReplCommand::Suggest,
            "lang" | "language" | "l" => ReplCommand::Language(arg),
            "key" => ReplCommand::Key(arg),
            "forget" => ReplCommand::ForgetKey,
            "last" => ReplCommand::Last,
            "json" => ReplCommand::Json,
            _ => ReplCommand::Unknown(line.to_string()),
        })
    }
}

/// Interactive lookup REPL
pub struct ChatRepl {
    orchestrator: Arc<QueryOrchestrator>,
    suggester: Option<SuggestTopicUseCase>,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(orchestrator: Arc<QueryOrchestrator>) -> Self {
        Self {
            orchestrator,
            suggester: None,
            config: ReplConfig::default(),
        }
    }

    /// Enable `/suggest` through the model
    pub fn with_suggester(mut self, suggester: SuggestTopicUseCase) -> Self {
        self.suggester = Some(suggester);
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        match self.config.history_file.as_deref().and_then(open_history) {
            Some(history) => editor.with_history(Box::new(history)),
            None => editor,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.config.prompt.clone()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        if let Some(topic) = &self.config.initial_topic
            && self.orchestrator.has_credential()
        {
            self.look_up(self.orchestrator.submit_query(topic)).await;
        }

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    if !self.handle(command).await {
                        break;
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 ASCII Wiki                  │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Language: {}", self.orchestrator.language());
        if !self.orchestrator.has_credential() {
            println!(
                "{}",
                "No API key configured. Use /key <KEY> or set GEMINI_API_KEY.".yellow()
            );
        }
        println!("Type a word to look it up, or /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <topic>             - Look up a topic");
        println!("  /random, /r         - Look up a random curated topic");
        println!("  /suggest, /s        - Let the model pick a topic");
        println!("  /lang [LANGUAGE]    - Show or change the definition language");
        println!("  /key [KEY]          - Show key status or set the API key");
        println!("  /forget             - Forget the API key for this session");
        println!("  /last               - Show the last result again");
        println!("  /json               - Show the last result as JSON");
        println!("  /help, /h, /?       - Show this help");
        println!("  /quit, /exit, /q    - Exit");
        println!();
    }

    /// Handle one command. Returns false if the REPL should exit.
    async fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Lookup(topic) => {
                self.look_up(self.orchestrator.submit_query(&topic)).await;
            }
            ReplCommand::Random => {
                self.look_up(self.orchestrator.submit_random_query()).await;
            }
            ReplCommand::Suggest => {
                let submitted = match self.suggest().await {
                    Some(topic) => self.orchestrator.submit_query(&topic),
                    None => self.orchestrator.submit_random_query(),
                };
                self.look_up(submitted).await;
            }
            ReplCommand::Language(None) => {
                println!(
                    "Language: {} ({} supported)",
                    self.orchestrator.language(),
                    SUPPORTED_LANGUAGES.len()
                );
            }
            ReplCommand::Language(Some(name)) => match canonical_language(&name) {
                Some(language) => {
                    self.orchestrator.set_language(language);
                    println!("Language set to {}", language);
                }
                None => {
                    self.orchestrator.set_language(name.as_str());
                    println!(
                        "{} '{}' is not in the supported list; using it as-is",
                        "Note:".yellow(),
                        name
                    );
                }
            },
            ReplCommand::Key(None) => {
                if self.orchestrator.has_credential() {
                    println!("An API key is set.");
                } else {
                    println!("No API key set.");
                }
            }
            ReplCommand::Key(Some(key)) => match Credential::try_new(key) {
                Some(credential) => {
                    self.orchestrator.set_credential(Some(credential));
                    println!("API key set for this session.");
                }
                None => println!("The key cannot be blank."),
            },
            ReplCommand::ForgetKey => {
                self.orchestrator.clear_credential();
                println!("API key cleared.");
            }
            ReplCommand::Last => println!("{}", ConsoleFormatter::format(&self.orchestrator.snapshot())),
            ReplCommand::Json => {
                println!("{}", ConsoleFormatter::format_json(&self.orchestrator.snapshot()));
            }
            ReplCommand::Unknown(line) => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        true
    }

    /// Model-suggested topic, or `None` to fall back to the curated list.
    async fn suggest(&self) -> Option<String> {
        let suggester = self.suggester.as_ref()?;
        let credential = self.orchestrator.credential()?;
        match suggester
            .execute(&self.orchestrator.language(), &credential)
            .await
        {
            Ok(topic) => Some(topic),
            Err(e) => {
                warn!("Topic suggestion failed, using curated list: {}", e);
                None
            }
        }
    }

    /// Stream one query to the terminal until it settles.
    async fn look_up(&self, submitted: Result<QueryTicket, DomainError>) {
        let ticket = match submitted {
            Ok(ticket) => ticket,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                return;
            }
        };

        println!();
        println!("{}", ConsoleFormatter::header(&ticket.query));
        println!();

        let mut rx = self.orchestrator.subscribe();
        let mut stdout = std::io::stdout();
        let followed = tokio::select! {
            result = follow_definition(&mut rx, ticket.id, &mut stdout) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };
        println!();

        match followed {
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!("Could not write to stdout: {}", e);
                return;
            }
            None => {
                println!("{}", "(stopped following; the next lookup replaces it)".dimmed());
                return;
            }
        }

        let snapshot = tokio::select! {
            snapshot = wait_settled(&mut rx, ticket.id) => snapshot,
            _ = tokio::signal::ctrl_c() => return,
        };
        self.print_settled(&snapshot, &ticket);
    }

    fn print_settled(&self, snapshot: &QuerySnapshot, ticket: &QueryTicket) {
        if snapshot.query_id != ticket.id {
            return;
        }
        if let Some(artifact) = &snapshot.artifact {
            println!();
            println!("{}", ConsoleFormatter::format_artifact(artifact));
        }
        let status = ConsoleFormatter::format_status(snapshot);
        if !status.is_empty() {
            println!("{}", status);
        }
        println!();
    }
}

/// File-backed history at `path`, or `None` (logged) if it cannot be set up.
fn open_history(path: &Path) -> Option<FileBackedHistory> {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!("Could not create history directory {}: {}", parent.display(), e);
        return None;
    }
    match FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()) {
        Ok(history) => Some(history),
        Err(e) => {
            warn!("Could not open history file {}: {}", path.display(), e);
            None
        }
    }
}
