//! Observable state of the live query.
//!
//! [`QuerySnapshot`] is what the presentation layer renders. All mutators
//! are plain state transitions; the orchestrator decides whether a given
//! branch is still allowed to call them.

use super::state::{BranchStatus, QueryRunState, RunPhase};
use crate::artifact::entities::ArtifactResult;
use crate::core::query::{Query, QueryId};
use serde::Serialize;

/// Shown when the text branch failed before producing any fragment.
pub const CONTENT_FAILURE_MESSAGE: &str = "An Error Occurred: Content could not be generated.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuerySnapshot {
    /// Identity of the query this snapshot belongs to.
    pub query_id: QueryId,
    pub query: Option<Query>,
    pub state: QueryRunState,
    /// Definition text accumulated so far.
    pub definition: String,
    pub artifact: Option<ArtifactResult>,
}

impl QuerySnapshot {
    /// Idle state: nothing submitted.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Fresh in-flight state for a new query; prior results are dropped.
    pub fn begin(query_id: QueryId, query: Query) -> Self {
        Self {
            query_id,
            query: Some(query),
            state: QueryRunState::in_flight(),
            definition: String::new(),
            artifact: None,
        }
    }

    /// Whether results tagged with `query_id` may still be written here.
    pub fn is_live(&self, query_id: QueryId) -> bool {
        self.query_id == query_id && self.state.phase == RunPhase::InFlight
    }

    /// Append a streamed fragment in arrival order.
    pub fn append_fragment(&mut self, fragment: &str) {
        self.definition.push_str(fragment);
    }

    /// Mark the text branch as finished normally.
    pub fn complete_text(&mut self) {
        self.state.text = BranchStatus::Succeeded;
        self.state.settle_if_done();
    }

    /// Mark the text branch failed, keeping whatever was accumulated.
    ///
    /// Only an empty definition is replaced by [`CONTENT_FAILURE_MESSAGE`].
    pub fn fail_text(&mut self) {
        if self.definition.is_empty() {
            self.definition = CONTENT_FAILURE_MESSAGE.to_string();
        }
        self.state.text = BranchStatus::Failed;
        self.state.settle_if_done();
    }

    /// Publish the artifact for this query.
    pub fn set_artifact(&mut self, artifact: ArtifactResult) {
        self.artifact = Some(artifact);
        self.state.artifact = BranchStatus::Succeeded;
        self.state.settle_if_done();
    }

    /// A query is running.
    pub fn is_loading(&self) -> bool {
        self.state.phase == RunPhase::InFlight
    }

    /// Definition text is still arriving.
    pub fn is_streaming(&self) -> bool {
        self.is_loading() && self.state.text == BranchStatus::Pending
    }

    pub fn is_settled(&self) -> bool {
        self.state.phase == RunPhase::Settled
    }

    /// Loading with nothing to show yet: render a skeleton.
    pub fn shows_skeleton(&self) -> bool {
        self.is_loading() && self.definition.is_empty()
    }
}
