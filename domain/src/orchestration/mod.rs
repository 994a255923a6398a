//! Query orchestration state: phase, branch flags and the observable snapshot.

pub mod snapshot;
pub mod state;
