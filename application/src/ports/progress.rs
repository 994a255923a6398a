//! Progress notification port
//!
//! Defines the callbacks the orchestrator fires while a query is live.
//! Callbacks only fire for the live query; results of a superseded query
//! never reach a notifier.

use wiki_domain::{ArtifactResult, BranchStatus, Query, QueryId, QuerySnapshot};

/// Callback for progress updates during query execution
///
/// Implementations live in the presentation layer (spinners, console
/// streaming). Every method has a no-op default.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a query becomes live.
    fn on_query_start(&self, _id: QueryId, _query: &Query) {}

    /// Called for each definition fragment accepted into the live state.
    fn on_fragment(&self, _id: QueryId, _fragment: &str) {}

    /// Called when the definition branch finishes.
    fn on_definition_done(&self, _id: QueryId, _status: BranchStatus) {}

    /// Called when the artifact branch publishes its result.
    fn on_artifact(&self, _id: QueryId, _artifact: &ArtifactResult) {}

    /// Called once both branches are done.
    fn on_settled(&self, _snapshot: &QuerySnapshot) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
