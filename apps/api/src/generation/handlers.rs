//! Axum route handlers for the Generation API.
//!
//! Handlers validate field presence (the rules vary by document type),
//! build a per-request Gemini client from the caller's credential, and
//! delegate to an orchestrator. Validation lives in plain functions so the
//! rules are testable without a running server. The credential is used for
//! the request only — never stored, never logged.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::gemini::{GeminiClient, ImageArtifact};
use crate::generation::image::{generate_illustration, ImageGenerationRequest};
use crate::generation::parser::GeneratedText;
use crate::generation::pipeline::{generate_document, DocumentRequest};
use crate::generation::prompts::{
    DocType, PromptInputs, DEFAULT_IMAGE_STYLES, DEFAULT_WRITING_STYLES,
};
use crate::generation::text::{generate_text_content, TextGenerationRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerateBody {
    pub doc_type: Option<String>,
    pub writing_style: Option<String>,
    pub keywords: Option<String>,
    pub original_text: Option<String>,
    pub custom_prompt: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerateBody {
    pub text_title: Option<String>,
    pub text_content: Option<String>,
    pub keywords: Option<String>,
    pub image_style: Option<String>,
    pub custom_prompt: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    pub doc_type: Option<String>,
    pub keywords: Option<String>,
    pub writing_style: Option<String>,
    pub image_style: Option<String>,
    pub custom_prompt: Option<String>,
    pub api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// A field counts as present only when non-empty.
fn take(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn doc_type_list(types: &[DocType]) -> String {
    types.iter().map(|d| d.label()).collect::<Vec<_>>().join(", ")
}

/// Validates a text-generation body and splits it into the orchestrator
/// request plus the caller's credential.
fn validate_text_request(body: TextGenerateBody) -> Result<(TextGenerationRequest, String), AppError> {
    let doc_type_label = take(body.doc_type);
    let api_key = take(body.api_key);
    let (Some(doc_type_label), Some(api_key)) = (doc_type_label, api_key) else {
        return Err(AppError::Validation(
            "Missing required fields: docType, apiKey".to_string(),
        ));
    };

    let Some(doc_type) = DocType::from_label(&doc_type_label) else {
        return Err(AppError::Validation(format!(
            "Invalid docType. Must be one of: {}",
            doc_type_list(&DocType::ALL)
        )));
    };

    let writing_style = take(body.writing_style);
    if doc_type != DocType::TypoCorrection && writing_style.is_none() {
        return Err(AppError::Validation(
            "Missing required field: writingStyle".to_string(),
        ));
    }

    let inputs = if doc_type.is_revision() {
        let Some(original_text) = take(body.original_text) else {
            return Err(AppError::Validation(
                "Missing required field for revision: originalText".to_string(),
            ));
        };
        PromptInputs::Revision {
            original_text,
            writing_style,
        }
    } else {
        let Some(keywords) = take(body.keywords) else {
            return Err(AppError::Validation(
                "Missing required field for generation: keywords".to_string(),
            ));
        };
        PromptInputs::Generation {
            keywords,
            // Present for every generation type per the check above.
            writing_style: writing_style.unwrap_or_default(),
        }
    };

    Ok((
        TextGenerationRequest {
            doc_type,
            inputs,
            custom_prompt: take(body.custom_prompt),
        },
        api_key,
    ))
}

fn validate_image_request(body: ImageGenerateBody) -> Result<(ImageGenerationRequest, String), AppError> {
    let (Some(title), Some(content), Some(keywords), Some(image_style), Some(api_key)) = (
        take(body.text_title),
        take(body.text_content),
        take(body.keywords),
        take(body.image_style),
        take(body.api_key),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: textTitle, textContent, keywords, imageStyle, apiKey"
                .to_string(),
        ));
    };

    Ok((
        ImageGenerationRequest {
            title,
            content,
            keywords,
            image_style,
            custom_prompt: take(body.custom_prompt),
        },
        api_key,
    ))
}

fn validate_document_request(body: GenerateBody) -> Result<(DocumentRequest, String), AppError> {
    let (Some(doc_type_label), Some(keywords), Some(writing_style), Some(image_style), Some(api_key)) = (
        take(body.doc_type),
        take(body.keywords),
        take(body.writing_style),
        take(body.image_style),
        take(body.api_key),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: docType, keywords, writingStyle, imageStyle, apiKey"
                .to_string(),
        ));
    };

    // The combined endpoint only serves generation types.
    let doc_type = DocType::from_label(&doc_type_label)
        .filter(|d| !d.is_revision())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid docType. Must be one of: {}",
                doc_type_list(&DocType::GENERATION)
            ))
        })?;

    Ok((
        DocumentRequest {
            doc_type,
            keywords,
            writing_style,
            image_style,
            custom_prompt: take(body.custom_prompt),
        },
        api_key,
    ))
}

/// Renders an image artifact as an inline data URL for the combined
/// response.
fn data_url(mime_type: &str, base64_image: &str) -> String {
    format!("data:{mime_type};base64,{base64_image}")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/text-generate
///
/// Generates or revises a document and returns the parsed title/content.
pub async fn handle_text_generate(
    State(state): State<AppState>,
    Json(body): Json<TextGenerateBody>,
) -> Result<Json<GeneratedText>, AppError> {
    let (request, api_key) = validate_text_request(body)?;
    let client = GeminiClient::new(state.http.clone(), api_key);
    let result = generate_text_content(&client, &request).await?;
    Ok(Json(result))
}

/// POST /api/image-generate
///
/// Runs the two-call image sequence for an existing title/content pair.
pub async fn handle_image_generate(
    State(state): State<AppState>,
    Json(body): Json<ImageGenerateBody>,
) -> Result<Json<ImageArtifact>, AppError> {
    let (request, api_key) = validate_image_request(body)?;
    let client = GeminiClient::new(state.http.clone(), api_key);
    let image = generate_illustration(&client, &request).await?;
    Ok(Json(image))
}

/// POST /api/generate
///
/// Combined pipeline: text first, then the illustration conditioned on it.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<Value>, AppError> {
    let (request, api_key) = validate_document_request(body)?;
    let client = GeminiClient::new(state.http.clone(), api_key);
    let artifact = generate_document(&client, request).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "text": artifact.text,
            "image": {
                "base64Image": data_url(&artifact.image.mime_type, &artifact.image.base64_image),
                "mimeType": artifact.image.mime_type,
            }
        }
    })))
}

/// GET /api/generate
///
/// Static usage description of the combined endpoint.
pub async fn describe_generate() -> Json<Value> {
    Json(json!({
        "endpoint": "/api/generate",
        "method": "POST",
        "description": "텍스트와 이미지를 한 번에 생성합니다 (권장)",
        "requiredFields": ["docType", "keywords", "writingStyle", "imageStyle", "apiKey"],
        "optionalFields": ["customPrompt"],
        "docTypeOptions": DocType::GENERATION.iter().map(|d| d.label()).collect::<Vec<_>>(),
        "example": {
            "request": {
                "docType": "상장",
                "keywords": "#고마워, #사랑해",
                "writingStyle": "근엄하게",
                "imageStyle": "수채화",
                "apiKey": "your-gemini-api-key",
            },
            "response": {
                "success": true,
                "data": {
                    "text": { "title": "감사의 마음", "content": "감사합니다..." },
                    "image": {
                        "base64Image": "data:image/png;base64,...",
                        "mimeType": "image/png",
                    }
                }
            }
        }
    }))
}

/// GET /api/styles
///
/// The default writing/image style catalogs. Callers may still send any
/// free-form style string — these are the stock choices.
pub async fn handle_styles() -> Json<Value> {
    Json(json!({
        "writingStyles": DEFAULT_WRITING_STYLES,
        "imageStyles": DEFAULT_IMAGE_STYLES,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
