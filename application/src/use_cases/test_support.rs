//! Scripted gateway shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway, StreamHandle};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};
use wiki_domain::{Credential, StreamEvent};

pub(crate) enum StreamScript {
    /// Events delivered immediately, then the channel closes.
    Events(Vec<StreamEvent>),
    /// Events pushed by the test through the paired sender.
    Open(mpsc::Receiver<StreamEvent>),
    /// The stream never opens.
    Fail(GatewayError),
}

pub(crate) enum GenerateScript {
    Reply(Result<String, GatewayError>),
    /// Reply released by the test through the paired sender.
    Gated(oneshot::Receiver<Result<String, GatewayError>>),
}

#[derive(Default)]
pub(crate) struct MockGateway {
    streams: Mutex<VecDeque<StreamScript>>,
    replies: Mutex<VecDeque<GenerateScript>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
    pub stream_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_stream(&self, script: StreamScript) -> &Self {
        self.streams.lock().unwrap().push_back(script);
        self
    }

    pub fn push_stream_events(&self, events: Vec<StreamEvent>) -> &Self {
        self.push_stream(StreamScript::Events(events))
    }

    /// Script an open stream and return the sender feeding it.
    pub fn push_open_stream(&self) -> mpsc::Sender<StreamEvent> {
        let (tx, rx) = mpsc::channel(16);
        self.push_stream(StreamScript::Open(rx));
        tx
    }

    pub fn push_reply(&self, reply: Result<String, GatewayError>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(GenerateScript::Reply(reply));
        self
    }

    /// Script a reply that is only delivered when the test sends it.
    pub fn push_gated_reply(&self) -> oneshot::Sender<Result<String, GatewayError>> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .unwrap()
            .push_back(GenerateScript::Gated(rx));
        tx
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn stream_text(
        &self,
        _credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<StreamHandle, GatewayError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let script = self.streams.lock().unwrap().pop_front();
        match script {
            Some(StreamScript::Events(events)) => {
                let (tx, rx) = mpsc::channel(events.len().max(1));
                for event in events {
                    let _ = tx.try_send(event);
                }
                Ok(StreamHandle::new(rx))
            }
            Some(StreamScript::Open(rx)) => Ok(StreamHandle::new(rx)),
            Some(StreamScript::Fail(err)) => Err(err),
            None => Err(GatewayError::Other("no scripted stream".into())),
        }
    }

    async fn generate(
        &self,
        _credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<String, GatewayError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let script = self.replies.lock().unwrap().pop_front();
        match script {
            Some(GenerateScript::Reply(reply)) => reply,
            Some(GenerateScript::Gated(rx)) => rx.await.unwrap_or(Err(GatewayError::TransportClosed)),
            None => Err(GatewayError::Other("no scripted reply".into())),
        }
    }
}

pub(crate) fn credential() -> Credential {
    Credential::try_new("test-key").unwrap()
}
