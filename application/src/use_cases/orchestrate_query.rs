//! Query orchestration.
//!
//! [`QueryOrchestrator`] turns a submitted topic into two concurrent
//! branches (artifact and definition) and folds their results into one
//! observable [`QuerySnapshot`].
//!
//! Every submission gets a fresh, strictly increasing [`QueryId`]. Before a
//! branch writes anything it checks, under the snapshot's lock, that its id
//! is still the live one; results of a superseded query are dropped.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::generate_artifact::GenerateArtifactUseCase;
use crate::use_cases::stream_definition::{DefinitionStream, StreamDefinitionUseCase};
use serde_json::json;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wiki_domain::{
    BranchStatus, Credential, DEFAULT_LANGUAGE, DomainError, Query, QueryId, QuerySnapshot,
    fallback_artifact, pick_random_topic,
};

#[derive(Default)]
struct Submission {
    last_id: u64,
    token: Option<CancellationToken>,
}

/// Coordinates the two branches of the live query.
pub struct QueryOrchestrator {
    artifact: GenerateArtifactUseCase,
    definition: StreamDefinitionUseCase,
    state: Arc<watch::Sender<QuerySnapshot>>,
    submission: Mutex<Submission>,
    credential: RwLock<Option<Credential>>,
    language: RwLock<String>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl QueryOrchestrator {
    pub fn new(artifact: GenerateArtifactUseCase, definition: StreamDefinitionUseCase) -> Self {
        let (state, _) = watch::channel(QuerySnapshot::idle());
        Self {
            artifact,
            definition,
            state: Arc::new(state),
            submission: Mutex::new(Submission::default()),
            credential: RwLock::new(None),
            language: RwLock::new(DEFAULT_LANGUAGE.to_string()),
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_credential(self, credential: Option<Credential>) -> Self {
        self.set_credential(credential);
        self
    }

    pub fn with_language(self, language: impl Into<String>) -> Self {
        self.set_language(language);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    // ==================== Session settings ====================

    /// Replace the credential used by subsequent submissions.
    pub fn set_credential(&self, credential: Option<Credential>) {
        *self.credential.write().unwrap_or_else(|e| e.into_inner()) = credential;
    }

    pub fn clear_credential(&self) {
        self.set_credential(None);
    }

    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_credential(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Language used by [`submit_query`](Self::submit_query).
    pub fn set_language(&self, language: impl Into<String>) {
        *self.language.write().unwrap_or_else(|e| e.into_inner()) = language.into();
    }

    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    // ==================== Observation ====================

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.state.subscribe()
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> QuerySnapshot {
        self.state.borrow().clone()
    }

    // ==================== Submission ====================

    /// Submit `topic` in the session language.
    pub fn submit_query(&self, topic: &str) -> Result<QueryTicket, DomainError> {
        let language = self.language();
        self.submit_query_in(topic, &language)
    }

    /// Submit a topic drawn uniformly from the curated list.
    pub fn submit_random_query(&self) -> Result<QueryTicket, DomainError> {
        let topic = pick_random_topic(&mut rand::thread_rng());
        self.submit_query(topic)
    }

    /// Submit `topic` in an explicit language, superseding any live query.
    ///
    /// Must be called from within a tokio runtime: both branches are
    /// spawned before this returns.
    pub fn submit_query_in(&self, topic: &str, language: &str) -> Result<QueryTicket, DomainError> {
        let query = Query::try_new(topic, language)?;
        let credential = self.credential();
        let token = CancellationToken::new();

        let id = {
            let mut submission = self.submission.lock().unwrap_or_else(|e| e.into_inner());
            submission.last_id += 1;
            let id = QueryId::new(submission.last_id);
            if let Some(previous) = submission.token.replace(token.clone()) {
                previous.cancel();
            }
            self.state.send_replace(QuerySnapshot::begin(id, query.clone()));
            id
        };

        info!("Query {} submitted: {}", id, query);
        self.conversation_logger.log(ConversationEvent::new(
            "query_submitted",
            json!({
                "query_id": id.get(),
                "topic": query.text(),
                "language": query.language(),
                "has_credential": credential.is_some(),
            }),
        ));
        self.progress.on_query_start(id, &query);

        let publisher = Publisher {
            id,
            state: self.state.clone(),
            progress: self.progress.clone(),
            conversation_logger: self.conversation_logger.clone(),
        };
        let stream = self
            .definition
            .stream(query.text(), query.language(), credential.clone());
        let artifact = self.artifact.clone();
        let branch_query = query.clone();

        let handle = tokio::spawn(async move {
            let artifact_task = tokio::spawn(run_artifact_branch(
                publisher.clone(),
                artifact,
                branch_query.clone(),
                credential,
                token.clone(),
            ));
            let definition_task =
                tokio::spawn(run_definition_branch(publisher.clone(), stream, token));

            let (artifact_done, definition_done) = tokio::join!(artifact_task, definition_task);

            // A panicking branch still has to leave a settled state behind.
            if let Err(err) = artifact_done {
                warn!("Artifact branch of {} aborted: {}", publisher.id, err);
                let fallback = fallback_artifact(branch_query.text());
                publisher.publish(|s| s.set_artifact(fallback), |_| {});
            }
            if let Err(err) = definition_done {
                warn!("Definition branch of {} aborted: {}", publisher.id, err);
                publisher.publish(|s| s.fail_text(), |_| {});
            }
        });

        Ok(QueryTicket { id, query, handle })
    }
}

/// Handle to a submitted query.
pub struct QueryTicket {
    pub id: QueryId,
    pub query: Query,
    handle: JoinHandle<()>,
}

impl QueryTicket {
    /// Wait until both branches have finished (or given up after supersession).
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            warn!("Query {} driver failed: {}", self.id, err);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Writes branch results into the shared snapshot if the query is live.
#[derive(Clone)]
struct Publisher {
    id: QueryId,
    state: Arc<watch::Sender<QuerySnapshot>>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Publisher {
    /// Apply `mutate` if `id` is live. Returns `false` for a stale query.
    ///
    /// `notify` runs only for accepted updates whose query is still live,
    /// before the settle callback.
    fn publish(
        &self,
        mutate: impl FnOnce(&mut QuerySnapshot),
        notify: impl FnOnce(&dyn ProgressNotifier),
    ) -> bool {
        let mut settled = None;
        let accepted = self.state.send_if_modified(|snapshot| {
            if !snapshot.is_live(self.id) {
                return false;
            }
            mutate(snapshot);
            if snapshot.is_settled() {
                settled = Some(snapshot.clone());
            }
            true
        });

        if !accepted {
            debug!("Discarding result of superseded query {}", self.id);
            return false;
        }

        // A newer query may have started since the update was accepted; its
        // progress display must not see this query's callbacks.
        if self.state.borrow().is_live(self.id) {
            notify(self.progress.as_ref());
        }
        if let Some(snapshot) = settled {
            info!(
                "Query {} settled (definition: {}, artifact: {})",
                self.id, snapshot.state.text, snapshot.state.artifact
            );
            self.conversation_logger.log(ConversationEvent::new(
                "query_settled",
                json!({
                    "query_id": self.id.get(),
                    "definition_status": snapshot.state.text.to_string(),
                    "definition_chars": snapshot.definition.chars().count(),
                    "artifact_fallback": snapshot.artifact.as_ref().is_some_and(|a| a.is_fallback()),
                }),
            ));
            self.progress.on_settled(&snapshot);
        }
        true
    }
}

async fn run_artifact_branch(
    publisher: Publisher,
    use_case: GenerateArtifactUseCase,
    query: Query,
    credential: Option<Credential>,
    token: CancellationToken,
) {
    let artifact = match credential {
        Some(credential) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Artifact branch of {} cancelled", publisher.id);
                    return;
                }
                artifact = use_case.execute(query.text(), query.language(), &credential) => artifact,
            }
        }
        None => {
            debug!("No API key; using fallback artifact for {}", publisher.id);
            fallback_artifact(query.text())
        }
    };

    let id = publisher.id;
    let shown = artifact.clone();
    publisher.publish(
        |s| s.set_artifact(artifact),
        |progress| progress.on_artifact(id, &shown),
    );
}

async fn run_definition_branch(
    publisher: Publisher,
    mut stream: DefinitionStream,
    token: CancellationToken,
) {
    let id = publisher.id;
    loop {
        let item = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Definition branch of {} cancelled", id);
                return;
            }
            item = stream.next() => item,
        };

        match item {
            Some(Ok(fragment)) => {
                let accepted = publisher.publish(
                    |s| s.append_fragment(&fragment),
                    |progress| progress.on_fragment(id, &fragment),
                );
                if !accepted {
                    return;
                }
            }
            Some(Err(err)) => {
                publisher.conversation_logger.log(ConversationEvent::new(
                    "definition_failed",
                    json!({ "query_id": id.get(), "error": err.to_string() }),
                ));
                publisher.publish(
                    |s| s.fail_text(),
                    |progress| progress.on_definition_done(id, BranchStatus::Failed),
                );
                return;
            }
            None => {
                publisher.publish(
                    |s| s.complete_text(),
                    |progress| progress.on_definition_done(id, BranchStatus::Succeeded),
                );
                return;
            }
        }
    }
}
