//! CLI entrypoint for ascii-wiki
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wiki_application::{
    ConversationLogger, GenerateArtifactUseCase, NoProgress, ProgressNotifier, QueryOrchestrator,
    QueryTicket, StreamDefinitionUseCase, SuggestTopicUseCase,
};
use wiki_domain::DomainError;
use wiki_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiLlmGateway, JsonlConversationLogger,
    resolve_credential,
};
use wiki_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig, SimpleProgress,
    follow_definition, wait_settled,
};

/// Set up the tracing subscriber. With `--log-dir` the log goes to a daily
/// rolling file instead of stderr; the guard must outlive `main`.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ascii-wiki.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))?
    };

    // Invalid values fall back to defaults; report them and keep going.
    for issue in config.validate() {
        eprintln!("{}", ConsoleFormatter::format_issue(&issue));
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting ascii-wiki");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    let output = OutputConfig::new(cli.json, config.output.color);
    output.apply();

    let credential = match resolve_credential(cli.api_key.as_deref(), &config.gemini) {
        Some((credential, source)) => {
            info!("Using API key from {}", source);
            Some(credential)
        }
        None => {
            warn!(
                "No API key found (--api-key, [gemini] api_key or ${})",
                config.gemini.api_key_env
            );
            None
        }
    };

    let language = match &cli.language {
        Some(name) => wiki_domain::canonical_language(name)
            .map(str::to_string)
            .unwrap_or_else(|| name.trim().to_string()),
        None => config.language(),
    };

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiLlmGateway::new(GeminiConfig::from_file(&config.gemini))?);
    let models = config.model_config();
    let params = config.generation_params();

    let logger: Option<Arc<dyn ConversationLogger>> = config
        .logging
        .transcript_path()
        .and_then(JsonlConversationLogger::new)
        .map(|l| Arc::new(l) as Arc<dyn ConversationLogger>);

    let mut artifact =
        GenerateArtifactUseCase::new(gateway.clone(), models.artifact, params.artifact);
    if let Some(logger) = &logger {
        artifact = artifact.with_conversation_logger(logger.clone());
    }
    let definition =
        StreamDefinitionUseCase::new(gateway.clone(), models.definition, params.definition);
    let suggester = SuggestTopicUseCase::new(gateway.clone(), models.suggestion);

    let show_progress = !cli.quiet && config.repl.show_progress;
    let progress: Arc<dyn ProgressNotifier> = if !show_progress {
        Arc::new(NoProgress)
    } else if cli.json {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let mut orchestrator = QueryOrchestrator::new(artifact, definition)
        .with_credential(credential)
        .with_language(language)
        .with_progress(progress);
    if let Some(logger) = &logger {
        orchestrator = orchestrator.with_conversation_logger(logger.clone());
    }
    let orchestrator = Arc::new(orchestrator);

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            prompt: config.repl.prompt.clone(),
            history_file: config.repl.history_path(),
            initial_topic: cli
                .topic
                .clone()
                .or_else(|| Some(config.query.initial_topic.clone())),
        };
        let repl = ChatRepl::new(orchestrator)
            .with_suggester(suggester)
            .with_config(repl_config);

        repl.run().await?;
        return Ok(());
    }

    let submitted = if cli.random {
        orchestrator.submit_random_query()
    } else if cli.suggest {
        match suggest(&suggester, &orchestrator).await {
            Some(topic) => orchestrator.submit_query(&topic),
            None => orchestrator.submit_random_query(),
        }
    } else {
        match &cli.topic {
            Some(topic) => orchestrator.submit_query(topic),
            None => bail!("A topic is required. Use --random, --suggest or --chat."),
        }
    };
    let ticket = match submitted {
        Ok(ticket) => ticket,
        Err(DomainError::InvalidQuery(msg)) => bail!("Invalid topic: {}", msg),
        Err(e) => return Err(e.into()),
    };

    if output.is_json() {
        let id = ticket.id;
        let mut rx = orchestrator.subscribe();
        let snapshot = wait_settled(&mut rx, id).await;
        ticket.wait().await;
        println!("{}", ConsoleFormatter::format_json(&snapshot));
        return Ok(());
    }

    render(&orchestrator, ticket).await
}

/// Model-suggested topic, falling back to `None` (curated list) on any failure.
async fn suggest(suggester: &SuggestTopicUseCase, orchestrator: &QueryOrchestrator) -> Option<String> {
    let credential = orchestrator.credential()?;
    match suggester.execute(&orchestrator.language(), &credential).await {
        Ok(topic) => Some(topic),
        Err(e) => {
            warn!("Topic suggestion failed, using curated list: {}", e);
            None
        }
    }
}

/// Stream the definition to stdout, then print the artifact once settled.
async fn render(orchestrator: &QueryOrchestrator, ticket: QueryTicket) -> Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(stdout)?;
    writeln!(stdout, "{}", ConsoleFormatter::header(&ticket.query))?;
    writeln!(stdout)?;

    let mut rx = orchestrator.subscribe();
    follow_definition(&mut rx, ticket.id, &mut stdout).await?;
    writeln!(stdout)?;

    let snapshot = wait_settled(&mut rx, ticket.id).await;
    if let Some(artifact) = &snapshot.artifact {
        writeln!(stdout)?;
        writeln!(stdout, "{}", ConsoleFormatter::format_artifact(artifact))?;
    }
    let status = ConsoleFormatter::format_status(&snapshot);
    if !status.is_empty() {
        writeln!(stdout, "{}", status)?;
    }

    ticket.wait().await;
    Ok(())
}
