//! Streaming transport for the Generative Language API.
//!
//! `HttpTransport` POSTs `models/{model}:streamGenerateContent?alt=sse`
//! and turns the SSE body into a channel of `StreamChunk` events, one per
//! response part. Consumption is single-pass and append-only; the folds in
//! the parent module never see a partial event.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, Receiver};

use super::{GeminiConfig, GeminiError, Modality, SafetySetting};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One response part from the stream: a text fragment, an inline binary
/// payload, or (for unrecognized part shapes) neither.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamChunk {
    pub text: Option<String>,
    pub inline_data: Option<InlinePayload>,
}

/// Inline binary data as delivered by the backend: base64 content plus an
/// optional mime type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinePayload {
    pub mime_type: Option<String>,
    pub data: String,
}

/// The transport seam. The production implementation is `HttpTransport`;
/// tests inject a scripted stream.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    async fn stream_generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GeminiConfig,
    ) -> Result<Receiver<Result<StreamChunk, GeminiError>>, GeminiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Request envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: [Content<'a>; 1],
    safety_settings: &'a [SafetySetting],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<&'a [Modality]>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

fn build_body<'a>(prompt: &'a str, config: &'a GeminiConfig) -> GenerateContentBody<'a> {
    let generation_config = if config.thinking_budget.is_some() || config.response_modalities.is_some()
    {
        Some(GenerationConfig {
            thinking_config: config
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            response_modalities: config.response_modalities.as_deref(),
        })
    } else {
        None
    };

    GenerateContentBody {
        contents: [Content {
            role: "user",
            parts: [TextPart { text: prompt }],
        }],
        safety_settings: &config.safety_settings,
        generation_config,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<StreamChunk>,
}

/// Error body shape of the Generative Language API.
#[derive(Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP transport
// ────────────────────────────────────────────────────────────────────────────

/// Production transport: shared reqwest pool plus the caller's credential.
/// The credential lives only for the request and is never logged.
pub struct HttpTransport {
    http: reqwest::Client,
    api_key: String,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl GeminiTransport for HttpTransport {
    async fn stream_generate(
        &self,
        model: &str,
        prompt: &str,
        config: &GeminiConfig,
    ) -> Result<Receiver<Result<StreamChunk, GeminiError>>, GeminiError> {
        let url = format!("{API_BASE}/models/{model}:streamGenerateContent?alt=sse");
        let body = build_body(prompt, config);

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleError>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            // SSE events can straddle TCP chunk boundaries; buffer by line.
            let mut sse_buffer = String::new();

            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        sse_buffer.push_str(&String::from_utf8_lossy(&bytes));

                        while let Some(newline) = sse_buffer.find('\n') {
                            let line = sse_buffer[..newline].trim_end_matches('\r').to_string();
                            sse_buffer.drain(..=newline);

                            for chunk in parse_sse_line(&line) {
                                if tx.send(Ok(chunk)).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(GeminiError::Http(e))).await;
                        return;
                    }
                }
            }

            // Flush a trailing event the stream ended on without a newline.
            for chunk in parse_sse_line(sse_buffer.trim()) {
                if tx.send(Ok(chunk)).await.is_err() {
                    return;
                }
            }
        });

        Ok(rx)
    }
}

/// Decodes one SSE line into the parts of its first candidate. Lines that
/// are not `data: ` events, or carry JSON this service does not recognize,
/// yield nothing.
fn parse_sse_line(line: &str) -> Vec<StreamChunk> {
    let Some(data) = line.strip_prefix("data: ") else {
        return Vec::new();
    };
    let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
        return Vec::new();
    };
    event
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
}
