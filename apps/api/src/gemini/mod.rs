//! Gemini client — the single point of entry for all Generative Language
//! API calls in this service.
//!
//! ARCHITECTURAL RULE: no other module may talk to the backend directly.
//! Both orchestrators go through `GeminiClient`, which folds the streamed
//! response into a final value: concatenated text for the text primitive,
//! the last inline payload for the image primitive.
//!
//! Model ids are hardcoded — do not make them configurable to prevent drift.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc::Receiver;
use tracing::debug;

pub mod transport;

#[cfg(test)]
pub mod testing;

use self::transport::{GeminiTransport, HttpTransport, StreamChunk};

/// Fast text model used for document generation and image-prompt synthesis.
pub const TEXT_MODEL: &str = "gemini-flash-lite-latest";
/// Image-capable model used for the final image synthesis call.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Mime type assumed when the backend omits one on an inline payload.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Raw adapter failure. Classification into user-facing status codes
/// happens once, in `errors::classify` — never here.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The image stream completed without ever producing inline binary
    /// data. Distinct from a transport failure.
    #[error("No image data received from API")]
    MissingImagePayload,
}

// ────────────────────────────────────────────────────────────────────────────
// Request configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modality {
    #[serde(rename = "IMAGE")]
    Image,
    #[serde(rename = "TEXT")]
    Text,
}

/// Per-call request configuration.
///
/// `thinking_budget: Some(0)` disables extended reasoning on the fast text
/// model. The image model rejects the thinking option altogether, so the
/// image configuration omits it rather than zeroing it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub thinking_budget: Option<i32>,
    pub safety_settings: Vec<SafetySetting>,
    pub response_modalities: Option<Vec<Modality>>,
}

impl GeminiConfig {
    /// Default configuration for text generation calls.
    pub fn for_text() -> Self {
        Self {
            thinking_budget: Some(0),
            safety_settings: default_safety_settings(),
            response_modalities: None,
        }
    }

    /// Configuration for the image model: identical safety settings, no
    /// thinking option. Callers request modalities explicitly.
    pub fn for_image() -> Self {
        Self {
            thinking_budget: None,
            safety_settings: default_safety_settings(),
            response_modalities: None,
        }
    }
}

/// The four fixed content-safety thresholds: hate speech blocks only high
/// severity, the other three block medium and above.
fn default_safety_settings() -> Vec<SafetySetting> {
    vec![
        SafetySetting {
            category: HarmCategory::Harassment,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
        SafetySetting {
            category: HarmCategory::HateSpeech,
            threshold: HarmBlockThreshold::BlockOnlyHigh,
        },
        SafetySetting {
            category: HarmCategory::SexuallyExplicit,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
        SafetySetting {
            category: HarmCategory::DangerousContent,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Artifacts
// ────────────────────────────────────────────────────────────────────────────

/// An inline image extracted from the response stream. The payload stays
/// base64-encoded end to end; it is never decoded server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArtifact {
    pub base64_image: String,
    pub mime_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The Gemini client used by both orchestrators. Holds a transport behind a
/// trait object so tests can swap in a scripted stream.
#[derive(Clone)]
pub struct GeminiClient {
    transport: Arc<dyn GeminiTransport>,
}

impl GeminiClient {
    /// A client speaking to the real API with the caller's credential.
    /// `http` is the shared connection pool from `AppState`.
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(http, api_key)),
        }
    }

    /// A client over an injected transport. Used by tests.
    pub fn with_transport(transport: Arc<dyn GeminiTransport>) -> Self {
        Self { transport }
    }

    /// Streams a generation call and concatenates its text fragments.
    /// An entirely text-free stream is a success with an empty result.
    pub async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        config: &GeminiConfig,
    ) -> Result<String, GeminiError> {
        let rx = self.transport.stream_generate(model, prompt, config).await?;
        let text = collect_text(rx).await?;
        debug!("text generation succeeded: model={model}, chars={}", text.len());
        Ok(text)
    }

    /// Streams a generation call and extracts the image payload. If the
    /// backend emits several inline fragments, the last non-empty one wins.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        config: &GeminiConfig,
    ) -> Result<ImageArtifact, GeminiError> {
        let rx = self.transport.stream_generate(model, prompt, config).await?;
        let image = collect_image(rx).await?;
        debug!("image generation succeeded: model={model}, mime={}", image.mime_type);
        Ok(image)
    }
}

/// Folds a chunk stream into trimmed concatenated text.
async fn collect_text(
    mut rx: Receiver<Result<StreamChunk, GeminiError>>,
) -> Result<String, GeminiError> {
    let mut generated = String::new();
    while let Some(chunk) = rx.recv().await {
        if let Some(text) = chunk?.text {
            generated.push_str(&text);
        }
    }
    Ok(generated.trim().to_string())
}

/// Folds a chunk stream into the last non-empty inline payload.
async fn collect_image(
    mut rx: Receiver<Result<StreamChunk, GeminiError>>,
) -> Result<ImageArtifact, GeminiError> {
    let mut payload = None;
    while let Some(chunk) = rx.recv().await {
        if let Some(inline) = chunk?.inline_data {
            if !inline.data.is_empty() {
                payload = Some(inline);
            }
        }
    }
    let inline = payload.ok_or(GeminiError::MissingImagePayload)?;
    Ok(ImageArtifact {
        base64_image: inline.data,
        mime_type: inline.mime_type.unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::testing::{image_chunk, text_chunk, StubReply, StubTransport};
    use super::*;

    fn stub_client(replies: Vec<StubReply>) -> (GeminiClient, Arc<StubTransport>) {
        let transport = Arc::new(StubTransport::new(replies));
        (GeminiClient::with_transport(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_generate_text_concatenates_fragments() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![
            text_chunk("title : 감사"),
            text_chunk("상\ncontent : "),
            text_chunk("고마운 마음"),
        ])]);
        let text = client
            .generate_text(TEXT_MODEL, "prompt", &GeminiConfig::for_text())
            .await
            .unwrap();
        assert_eq!(text, "title : 감사상\ncontent : 고마운 마음");
    }

    #[tokio::test]
    async fn test_generate_text_trims_result() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![text_chunk("  padded  \n")])]);
        let text = client
            .generate_text(TEXT_MODEL, "prompt", &GeminiConfig::for_text())
            .await
            .unwrap();
        assert_eq!(text, "padded");
    }

    #[tokio::test]
    async fn test_generate_text_empty_stream_is_empty_success() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![])]);
        let text = client
            .generate_text(TEXT_MODEL, "prompt", &GeminiConfig::for_text())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_generate_image_keeps_last_nonempty_payload() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![
            image_chunk("Zmlyc3Q=", Some("image/png")),
            text_chunk("interleaved commentary"),
            image_chunk("bGFzdA==", Some("image/png")),
            image_chunk("", Some("image/png")),
        ])]);
        let image = client
            .generate_image(IMAGE_MODEL, "prompt", &GeminiConfig::for_image())
            .await
            .unwrap();
        assert_eq!(image.base64_image, "bGFzdA==");
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_generate_image_defaults_mime_type() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![image_chunk("YWJj", None)])]);
        let image = client
            .generate_image(IMAGE_MODEL, "prompt", &GeminiConfig::for_image())
            .await
            .unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_generate_image_without_payload_is_missing_image_error() {
        let (client, _) = stub_client(vec![StubReply::Chunks(vec![text_chunk("prose only")])]);
        let err = client
            .generate_image(IMAGE_MODEL, "prompt", &GeminiConfig::for_image())
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::MissingImagePayload));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_raw() {
        let (client, _) = stub_client(vec![StubReply::Fail {
            status: 429,
            message: "RESOURCE_EXHAUSTED: quota".to_string(),
        }]);
        let err = client
            .generate_text(TEXT_MODEL, "prompt", &GeminiConfig::for_text())
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Api { status: 429, .. }));
    }

    #[test]
    fn test_text_config_fixes_thinking_and_safety() {
        let config = GeminiConfig::for_text();
        assert_eq!(config.thinking_budget, Some(0));
        assert_eq!(config.safety_settings.len(), 4);
        assert!(config.response_modalities.is_none());

        let hate_speech = config
            .safety_settings
            .iter()
            .find(|s| s.category == HarmCategory::HateSpeech)
            .unwrap();
        assert_eq!(hate_speech.threshold, HarmBlockThreshold::BlockOnlyHigh);
        for setting in config
            .safety_settings
            .iter()
            .filter(|s| s.category != HarmCategory::HateSpeech)
        {
            assert_eq!(setting.threshold, HarmBlockThreshold::BlockMediumAndAbove);
        }
    }

    #[test]
    fn test_image_config_omits_thinking_entirely() {
        let config = GeminiConfig::for_image();
        assert_eq!(config.thinking_budget, None);
        assert_eq!(config.safety_settings, GeminiConfig::for_text().safety_settings);
    }

    #[test]
    fn test_image_artifact_serializes_with_wire_field_names() {
        let image = ImageArtifact {
            base64_image: "YWJj".to_string(),
            mime_type: "image/png".to_string(),
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["base64Image"], "YWJj");
        assert_eq!(json["mimeType"], "image/png");
    }
}
