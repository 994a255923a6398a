//! Gemini implementation of the [`LlmGateway`] port.

use super::error::{GeminiError, Result};
use super::protocol::{GenerateContentRequest, GenerateContentResponse, error_message};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use eventsource_stream::{EventStreamError, Eventsource};
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wiki_application::{GatewayError, GenerationRequest, LlmGateway, StreamHandle};
use wiki_domain::{Credential, Model, StreamEvent};

const API_KEY_HEADER: &str = "x-goog-api-key";
const STREAM_BUFFER: usize = 64;

/// Connection settings for [`GeminiLlmGateway`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-call limit for single-shot requests. Streams are unbounded.
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::from_file(&FileGeminiConfig::default())
    }
}

impl GeminiConfig {
    pub fn from_file(file: &FileGeminiConfig) -> Self {
        Self {
            base_url: file.base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(file.connect_timeout_secs),
            request_timeout: Duration::from_secs(file.request_timeout_secs),
        }
    }
}

/// Gateway to the Gemini REST API.
///
/// The credential travels with every call; the gateway holds none.
pub struct GeminiLlmGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiLlmGateway {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, model: &Model, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.base_url, model, method)
    }

    async fn post(
        &self,
        url: &str,
        credential: &Credential,
        body: &GenerateContentRequest,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response> {
        let mut builder = self
            .client
            .post(url)
            .header(API_KEY_HEADER, credential.expose())
            .json(body);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(response)
    }

    /// Single-shot `generateContent` call.
    pub async fn generate_content(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<String> {
        let url = self.url(&request.model, "generateContent");
        let body = GenerateContentRequest::from_request(request);
        debug!("POST {} ({} prompt chars)", url, request.prompt.len());

        let response = self
            .post(&url, credential, &body, Some(self.config.request_timeout))
            .await?;
        let text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        extract_text(parsed)?.ok_or(GeminiError::EmptyResponse)
    }

    /// Open a `streamGenerateContent` SSE response.
    pub async fn open_stream(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<reqwest::Response> {
        let url = format!("{}?alt=sse", self.url(&request.model, "streamGenerateContent"));
        let body = GenerateContentRequest::from_request(request);
        debug!("POST {} (streaming)", url);
        self.post(&url, credential, &body, None).await
    }
}

/// Visible text of a response, or the error it carries.
fn extract_text(response: GenerateContentResponse) -> Result<Option<String>> {
    if let Some(error) = response.error {
        return Err(GeminiError::Api {
            status: error.code.and_then(|c| u16::try_from(c).ok()).unwrap_or(500),
            message: error.message,
        });
    }
    if let Some(reason) = response.block_reason() {
        return Err(GeminiError::Blocked(reason.to_string()));
    }
    let text = response.text();
    Ok((!text.is_empty()).then_some(text))
}

fn decode_frame(payload: &str) -> Result<Option<String>> {
    let response: GenerateContentResponse = serde_json::from_str(payload)?;
    extract_text(response)
}

/// Forward an SSE body into `tx` as [`StreamEvent`]s.
///
/// Ends with exactly one `Completed` or `Error`, unless the receiver is
/// dropped first.
pub(crate) async fn pump_sse<S, B, E>(body: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut events = std::pin::pin!(body.eventsource());

    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                let message = match e {
                    EventStreamError::Transport(e) => e.to_string(),
                    other => other.to_string(),
                };
                warn!("Stream interrupted: {}", message);
                let _ = tx.send(StreamEvent::Error(message)).await;
                return;
            }
        };
        if event.data.trim().is_empty() {
            continue;
        }
        if !forward_frame(&event.data, &tx).await {
            return;
        }
    }

    let _ = tx.send(StreamEvent::Completed(String::new())).await;
}

/// Returns `false` when the pump must stop.
async fn forward_frame(payload: &str, tx: &mpsc::Sender<StreamEvent>) -> bool {
    match decode_frame(payload) {
        Ok(Some(text)) => tx.send(StreamEvent::Delta(text)).await.is_ok(),
        Ok(None) => true,
        Err(e) => {
            warn!("Bad stream frame: {}", e);
            let _ = tx.send(StreamEvent::Error(e.to_string())).await;
            false
        }
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn stream_text(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let response = self.open_stream(credential, request).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump_sse(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }

    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GatewayError> {
        Ok(self.generate_content(credential, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn frame(text: &str) -> String {
        format!(
            "data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"text\":{}}}]}}}}]}}\n\n",
            serde_json::to_string(text).unwrap()
        )
    }

    async fn collect(chunks: Vec<std::result::Result<Vec<u8>, String>>) -> Vec<StreamEvent> {
        let (tx, mut rx) = mpsc::channel(16);
        pump_sse(stream::iter(chunks), tx).await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn urls_follow_rest_layout() {
        let gateway = GeminiLlmGateway::new(GeminiConfig {
            base_url: "https://example.test/v1beta".into(),
            ..GeminiConfig::default()
        })
        .unwrap();
        assert_eq!(
            gateway.url(&Model::Gemini25Flash, "generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn config_trims_trailing_slash() {
        let file = FileGeminiConfig {
            base_url: "https://example.test/v1beta/".into(),
            connect_timeout_secs: 3,
            ..FileGeminiConfig::default()
        };
        let config = GeminiConfig::from_file(&file);
        assert_eq!(config.base_url, "https://example.test/v1beta");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn frames_become_deltas_then_completed() {
        let body = format!("{}{}", frame("The "), frame("term."));
        let events = collect(vec![Ok(body.into_bytes())]).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("The ".into()),
                StreamEvent::Delta("term.".into()),
                StreamEvent::Completed(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn transport_error_ends_with_error_event() {
        let events = collect(vec![
            Ok(frame("Partial").into_bytes()),
            Err("connection reset".to_string()),
        ])
        .await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Partial".into()),
                StreamEvent::Error("connection reset".into()),
            ]
        );
    }

    #[tokio::test]
    async fn malformed_frame_ends_with_error_event() {
        let events = collect(vec![Ok(b"data: {not json\n\n".to_vec())]).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], StreamEvent::Error(msg) if msg.contains("JSON")));
    }

    #[tokio::test]
    async fn empty_frames_are_skipped() {
        let body = "data: {\"candidates\":[{\"finishReason\":\"STOP\"}]}\n\n";
        let events = collect(vec![Ok(body.as_bytes().to_vec())]).await;
        assert_eq!(events, vec![StreamEvent::Completed(String::new())]);
    }

    #[tokio::test]
    async fn frames_split_across_chunks_and_inside_utf8() {
        let body = format!("{}{}", frame("Café "), frame("au lait"));
        let bytes = body.into_bytes();
        // Split inside the two-byte 'é' and again inside the second frame.
        let cut = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let chunks = vec![
            Ok(bytes[..cut].to_vec()),
            Ok(bytes[cut..cut + 20].to_vec()),
            Ok(bytes[cut + 20..].to_vec()),
        ];

        let events = collect(chunks).await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Café ".into()),
                StreamEvent::Delta("au lait".into()),
                StreamEvent::Completed(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn comments_and_crlf_framing_are_handled() {
        let body = format!(
            ": keep-alive\r\n\r\n{}",
            frame("Hello").replace("\n\n", "\r\n\r\n")
        );
        let events = collect(vec![Ok(body.into_bytes())]).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hello".into()),
                StreamEvent::Completed(String::new()),
            ]
        );
    }

    #[test]
    fn extract_text_surfaces_embedded_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"error":{"code":429,"message":"quota"}}"#).unwrap();
        match extract_text(response) {
            Err(GeminiError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "quota");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
