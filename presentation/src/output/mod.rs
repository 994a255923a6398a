//! Output formatting for snapshots

pub mod console;
pub mod live;
