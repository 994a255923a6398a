//! Incremental printing of a live query.
//!
//! Follows the orchestrator's snapshot channel and writes only the part of
//! the definition that has not been printed yet.

use std::io::Write;
use tokio::sync::watch;
use wiki_domain::{QueryId, QuerySnapshot};

/// Print definition text for `id` as it grows; return the last snapshot seen.
///
/// Returns early if `id` is superseded or the orchestrator goes away.
pub async fn follow_definition<W: Write>(
    rx: &mut watch::Receiver<QuerySnapshot>,
    id: QueryId,
    out: &mut W,
) -> std::io::Result<QuerySnapshot> {
    let mut printed = 0usize;

    loop {
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.query_id != id {
            return Ok(snapshot);
        }

        // The definition only grows by appending, except when an empty
        // one is replaced by the failure message.
        if snapshot.definition.len() > printed {
            out.write_all(&snapshot.definition.as_bytes()[printed..])?;
            out.flush()?;
            printed = snapshot.definition.len();
        }

        if !snapshot.is_streaming() {
            return Ok(snapshot);
        }
        if rx.changed().await.is_err() {
            return Ok(snapshot);
        }
    }
}

/// Wait until `id` settles (or is superseded) and return that snapshot.
pub async fn wait_settled(
    rx: &mut watch::Receiver<QuerySnapshot>,
    id: QueryId,
) -> QuerySnapshot {
    let waited = rx
        .wait_for(|snapshot| snapshot.query_id != id || snapshot.is_settled())
        .await
        .map(|snapshot| snapshot.clone());
    match waited {
        Ok(snapshot) => snapshot,
        Err(_) => rx.borrow().clone(),
    }
}
