//! Console output formatter for query snapshots

use colored::Colorize;
use serde::Serialize;
use wiki_domain::{
    ArtifactResult, BranchStatus, ConfigIssue, Query, QuerySnapshot, RunPhase, Severity,
};

/// Formats query snapshots for console display
pub struct ConsoleFormatter;

/// Flat JSON view of a snapshot, including the derived flags.
#[derive(Serialize)]
struct SnapshotView<'a> {
    query_id: u64,
    topic: Option<&'a str>,
    language: Option<&'a str>,
    phase: RunPhase,
    definition_status: BranchStatus,
    artifact_status: BranchStatus,
    loading: bool,
    streaming: bool,
    definition: &'a str,
    artifact: Option<&'a ArtifactResult>,
}

impl ConsoleFormatter {
    /// Title line for a query.
    pub fn header(query: &Query) -> String {
        let title = format!("── {} ──", query.text());
        format!("{} {}", title.cyan().bold(), format!("({})", query.language()).dimmed())
    }

    /// The artifact block, with its caption and a placeholder note.
    pub fn format_artifact(artifact: &ArtifactResult) -> String {
        let mut output = artifact.art.clone();
        if let Some(caption) = &artifact.caption {
            output.push_str("\n\n");
            output.push_str(&caption.italic().to_string());
        }
        if artifact.is_fallback() {
            output.push('\n');
            output.push_str(&"(illustration unavailable, showing placeholder)".dimmed().to_string());
        }
        output
    }

    /// One-line summary of where the query stands.
    pub fn format_status(snapshot: &QuerySnapshot) -> String {
        if snapshot.shows_skeleton() {
            return "Loading...".dimmed().to_string();
        }
        if snapshot.is_streaming() {
            return "Streaming...".dimmed().to_string();
        }
        if snapshot.is_loading() {
            return "Drawing...".dimmed().to_string();
        }
        match snapshot.state.text {
            BranchStatus::Failed => "definition failed".red().to_string(),
            _ => String::new(),
        }
    }

    /// Format the complete snapshot: header, artifact, definition, status.
    pub fn format(snapshot: &QuerySnapshot) -> String {
        let Some(query) = &snapshot.query else {
            return "Nothing looked up yet.".dimmed().to_string();
        };

        let mut output = String::new();
        output.push_str(&Self::header(query));
        output.push_str("\n\n");

        if let Some(artifact) = &snapshot.artifact {
            output.push_str(&Self::format_artifact(artifact));
            output.push_str("\n\n");
        }

        output.push_str(&snapshot.definition);
        output.push('\n');

        let status = Self::format_status(snapshot);
        if !status.is_empty() {
            output.push('\n');
            output.push_str(&status);
            output.push('\n');
        }

        output
    }

    /// Format as JSON
    pub fn format_json(snapshot: &QuerySnapshot) -> String {
        let view = SnapshotView {
            query_id: snapshot.query_id.get(),
            topic: snapshot.query.as_ref().map(Query::text),
            language: snapshot.query.as_ref().map(Query::language),
            phase: snapshot.state.phase,
            definition_status: snapshot.state.text,
            artifact_status: snapshot.state.artifact,
            loading: snapshot.is_loading(),
            streaming: snapshot.is_streaming(),
            definition: &snapshot.definition,
            artifact: snapshot.artifact.as_ref(),
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    /// A config issue as a single warning/error line.
    pub fn format_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "config error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "config warning:".yellow().bold(), issue.message),
        }
    }
}
