//! Run state of a query and of its two branches.

use serde::{Deserialize, Serialize};

/// Overall lifecycle of the live query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// At least one branch is still running.
    InFlight,
    /// Both branches finished, successfully or not.
    Settled,
}

/// Outcome of one branch (artifact or text).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl BranchStatus {
    pub fn is_done(&self) -> bool {
        !matches!(self, BranchStatus::Pending)
    }
}

impl std::fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BranchStatus::Pending => "pending",
            BranchStatus::Succeeded => "succeeded",
            BranchStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Phase plus the two independent branch flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRunState {
    pub phase: RunPhase,
    pub artifact: BranchStatus,
    pub text: BranchStatus,
}

impl QueryRunState {
    /// Fresh state for a newly submitted query.
    pub fn in_flight() -> Self {
        Self {
            phase: RunPhase::InFlight,
            artifact: BranchStatus::Pending,
            text: BranchStatus::Pending,
        }
    }

    /// Move to `Settled` once both branches are done.
    ///
    /// Returns true if this call made the transition.
    pub fn settle_if_done(&mut self) -> bool {
        if self.phase == RunPhase::InFlight && self.artifact.is_done() && self.text.is_done() {
            self.phase = RunPhase::Settled;
            return true;
        }
        false
    }
}
