//! Stream Definition use case.
//!
//! Produces the definition of a topic as a lazy sequence of text fragments.
//! Nothing is requested from the gateway until the first fragment is pulled.
//!
//! Failures are reported twice: first as a human-readable error fragment
//! (so the reader sees something), then as a terminal `Err` that is
//! distinguishable from a normal end of stream.

use crate::config::DefinitionParams;
use crate::ports::llm_gateway::{GenerationOptions, GenerationRequest, LlmGateway, StreamHandle};
use futures::Stream;
use std::sync::Arc;
use tracing::{debug, warn};
use wiki_domain::{Credential, DomainError, Model, PromptTemplate, StreamEvent};

/// Fragment yielded when no credential is configured.
pub const MISSING_CREDENTIAL_FRAGMENT: &str =
    "Error: API_KEY is not configured. Please set your API key to continue.";

/// Fragment yielded when the transport fails for `topic`.
pub fn transport_error_fragment(topic: &str, message: &str) -> String {
    format!(
        "Error: Could not generate content for \"{topic}\". {message}. Please check if your API key is correct."
    )
}

/// Use case for streaming the definition of one query.
#[derive(Clone)]
pub struct StreamDefinitionUseCase {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    params: DefinitionParams,
}

impl StreamDefinitionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, params: DefinitionParams) -> Self {
        Self {
            gateway,
            model,
            params,
        }
    }

    /// Prepare a definition stream. No gateway call happens here.
    pub fn stream(
        &self,
        topic: &str,
        language: &str,
        credential: Option<Credential>,
    ) -> DefinitionStream {
        let request = GenerationRequest::new(
            self.model.clone(),
            PromptTemplate::definition(topic, language),
        )
        .with_options(
            GenerationOptions::default().with_minimal_thinking(!self.params.enable_thinking),
        );

        DefinitionStream {
            topic: topic.to_string(),
            yielded: false,
            state: StreamState::NotStarted {
                gateway: self.gateway.clone(),
                credential,
                request,
            },
        }
    }
}

enum StreamState {
    NotStarted {
        gateway: Arc<dyn LlmGateway>,
        credential: Option<Credential>,
        request: GenerationRequest,
    },
    Streaming(StreamHandle),
    /// Error fragment already yielded; the terminal error comes next.
    Failing(DomainError),
    Finished,
}

/// Lazy sequence of definition fragments.
///
/// `next` returns `Some(Ok(fragment))` for text, `Some(Err(_))` once on
/// failure, and `None` after a normal end or after the failure.
pub struct DefinitionStream {
    topic: String,
    yielded: bool,
    state: StreamState,
}

impl DefinitionStream {
    pub async fn next(&mut self) -> Option<Result<String, DomainError>> {
        loop {
            match std::mem::replace(&mut self.state, StreamState::Finished) {
                StreamState::NotStarted {
                    gateway,
                    credential,
                    request,
                } => {
                    let Some(credential) = credential else {
                        warn!("No API key configured; definition for '{}' skipped", self.topic);
                        self.state = StreamState::Failing(DomainError::MissingCredential);
                        return Some(Ok(MISSING_CREDENTIAL_FRAGMENT.to_string()));
                    };
                    debug!("Opening definition stream for '{}' with {}", self.topic, request.model);
                    match gateway.stream_text(&credential, &request).await {
                        Ok(handle) => self.state = StreamState::Streaming(handle),
                        Err(err) => return Some(Ok(self.fail(err.into()))),
                    }
                }
                StreamState::Streaming(mut handle) => match handle.next_event().await {
                    Some(StreamEvent::Delta(chunk)) => {
                        self.state = StreamState::Streaming(handle);
                        if chunk.is_empty() {
                            continue;
                        }
                        self.yielded = true;
                        return Some(Ok(chunk));
                    }
                    Some(StreamEvent::Completed(text)) => {
                        // Adapters that do not stream deliver everything here.
                        if !self.yielded && !text.is_empty() {
                            self.yielded = true;
                            return Some(Ok(text));
                        }
                        return None;
                    }
                    Some(StreamEvent::Error(message)) => {
                        return Some(Ok(self.fail(DomainError::TransportFailure(message))));
                    }
                    None => return None,
                },
                StreamState::Failing(err) => return Some(Err(err)),
                StreamState::Finished => return None,
            }
        }
    }

    fn fail(&mut self, err: DomainError) -> String {
        warn!("Definition stream for '{}' failed: {}", self.topic, err);
        let fragment = transport_error_fragment(&self.topic, &err.detail());
        self.state = StreamState::Failing(err);
        fragment
    }

    /// Adapt into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = Result<String, DomainError>> + Send {
        futures::stream::unfold(self, |mut stream| async move {
            stream.next().await.map(|item| (item, stream))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{MockGateway, StreamScript, credential};
    use futures::StreamExt;

    fn use_case(gateway: Arc<MockGateway>) -> StreamDefinitionUseCase {
        StreamDefinitionUseCase::new(gateway, Model::default(), DefinitionParams::default())
    }

    async fn drain(stream: DefinitionStream) -> Vec<Result<String, DomainError>> {
        stream.into_stream().collect().await
    }

    #[tokio::test]
    async fn fragments_arrive_in_order_then_end() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream_events(vec![
            StreamEvent::Delta("The ".into()),
            StreamEvent::Delta("term ".into()),
            StreamEvent::Delta("means X.".into()),
            StreamEvent::Completed(String::new()),
        ]);

        let items = drain(use_case(gateway).stream("Flux", "English", Some(credential()))).await;

        assert_eq!(
            items,
            vec![Ok("The ".into()), Ok("term ".into()), Ok("means X.".into())]
        );
    }

    #[tokio::test]
    async fn empty_deltas_are_skipped() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream_events(vec![
            StreamEvent::Delta(String::new()),
            StreamEvent::Delta("a".into()),
            StreamEvent::Completed(String::new()),
        ]);

        let items = drain(use_case(gateway).stream("Flux", "English", Some(credential()))).await;

        assert_eq!(items, vec![Ok("a".into())]);
    }

    #[tokio::test]
    async fn missing_credential_yields_one_fragment_and_no_calls() {
        let gateway = Arc::new(MockGateway::new());

        let items = drain(use_case(gateway.clone()).stream("Flux", "English", None)).await;

        assert_eq!(
            items,
            vec![
                Ok(MISSING_CREDENTIAL_FRAGMENT.to_string()),
                Err(DomainError::MissingCredential)
            ]
        );
        assert_eq!(gateway.stream_calls(), 0);
    }

    #[tokio::test]
    async fn mid_stream_failure_appends_error_fragment() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream_events(vec![
            StreamEvent::Delta("Partial ".into()),
            StreamEvent::Error("connection reset".into()),
        ]);

        let items = drain(use_case(gateway).stream("Flux", "English", Some(credential()))).await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Ok("Partial ".into()));
        assert_eq!(
            items[1],
            Ok(
                "Error: Could not generate content for \"Flux\". connection reset. Please check if your API key is correct."
                    .into()
            )
        );
        assert_eq!(
            items[2],
            Err(DomainError::TransportFailure("connection reset".into()))
        );
    }

    #[tokio::test]
    async fn open_failure_is_reported_as_fragment() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream(StreamScript::Fail(GatewayError::Authentication(
            "API key not valid".into(),
        )));

        let items = drain(use_case(gateway).stream("Flux", "English", Some(credential()))).await;

        assert_eq!(items.len(), 2);
        let fragment = items[0].as_ref().unwrap();
        assert!(fragment.starts_with("Error: Could not generate content for \"Flux\"."));
        assert!(fragment.contains("API key not valid"));
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn completed_text_used_when_nothing_streamed() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream_events(vec![StreamEvent::Completed("Whole answer.".into())]);

        let items = drain(use_case(gateway).stream("Flux", "English", Some(credential()))).await;

        assert_eq!(items, vec![Ok("Whole answer.".into())]);
    }

    #[tokio::test]
    async fn nothing_requested_until_polled() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_stream_events(vec![StreamEvent::Completed(String::new())]);

        let mut stream = use_case(gateway.clone()).stream("Flux", "English", Some(credential()));
        assert_eq!(gateway.stream_calls(), 0);

        assert_eq!(stream.next().await, None);
        assert_eq!(gateway.stream_calls(), 1);
        assert_eq!(stream.next().await, None);
    }
}
