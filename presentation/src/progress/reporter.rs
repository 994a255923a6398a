//! Progress reporting for query execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use wiki_application::ports::progress::ProgressNotifier;
use wiki_domain::{ArtifactResult, BranchStatus, Query, QueryId, QuerySnapshot};

/// Spinner shown while a query has nothing to display yet.
///
/// The spinner stands in for the loading skeleton: it disappears as soon
/// as the first definition fragment arrives (or the query settles).
/// Callbacks for any other query id leave it alone.
pub struct ProgressReporter {
    spinner: Mutex<Option<(QueryId, ProgressBar)>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner if it belongs to `id`.
    fn clear(&self, id: QueryId) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if spinner.as_ref().is_some_and(|(owner, _)| *owner == id)
            && let Some((_, pb)) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    fn active_query(&self) -> Option<QueryId> {
        self.spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(id, _)| *id)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_query_start(&self, id: QueryId, query: &Query) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(query.text().to_string());
        pb.set_message("looking up...");
        pb.enable_steady_tick(Duration::from_millis(100));

        // A superseded query's spinner is replaced, not stacked.
        if let Some((_, previous)) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace((id, pb))
        {
            previous.finish_and_clear();
        }
    }

    fn on_fragment(&self, id: QueryId, _fragment: &str) {
        self.clear(id);
    }

    fn on_artifact(&self, id: QueryId, _artifact: &ArtifactResult) {
        if let Some((owner, pb)) = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).as_ref()
            && *owner == id
        {
            pb.set_message("illustration ready, waiting for text...");
        }
    }

    fn on_settled(&self, snapshot: &QuerySnapshot) {
        self.clear(snapshot.query_id);
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_query_start(&self, id: QueryId, query: &Query) {
        eprintln!("{} {} {}", "->".cyan(), query.to_string().bold(), format!("[{}]", id).dimmed());
    }

    fn on_artifact(&self, _id: QueryId, artifact: &ArtifactResult) {
        if artifact.is_fallback() {
            eprintln!("  {} illustration (placeholder)", "~".yellow());
        } else {
            eprintln!("  {} illustration", "v".green());
        }
    }

    fn on_definition_done(&self, _id: QueryId, status: BranchStatus) {
        match status {
            BranchStatus::Failed => eprintln!("  {} definition", "x".red()),
            _ => eprintln!("  {} definition", "v".green()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(topic: &str) -> Query {
        Query::try_new(topic, "English").unwrap()
    }

    #[test]
    fn late_fragment_of_superseded_query_keeps_new_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_query_start(QueryId::new(1), &query("Old"));
        reporter.on_query_start(QueryId::new(2), &query("New"));

        reporter.on_fragment(QueryId::new(1), "stale");

        assert_eq!(reporter.active_query(), Some(QueryId::new(2)));
    }

    #[test]
    fn first_fragment_of_live_query_clears_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_query_start(QueryId::new(3), &query("Flux"));

        reporter.on_fragment(QueryId::new(3), "The ");

        assert_eq!(reporter.active_query(), None);
    }
}
