//! Text generation orchestrator.
//!
//! Flow: pick effective template (custom override or catalog default) →
//! inject variables → one fast-model call → tolerant parse.

use tracing::info;

use crate::errors::AppError;
use crate::gemini::{GeminiClient, GeminiConfig, TEXT_MODEL};
use crate::generation::parser::{parse_generated_text, GeneratedText};
use crate::generation::prompts::{replace_prompt_variables, DocType, PromptInputs};

/// A validated text-generation request. Built by the intake layer, which
/// enforces the per-type field rules before constructing `inputs`.
#[derive(Debug, Clone)]
pub struct TextGenerationRequest {
    pub doc_type: DocType,
    pub inputs: PromptInputs,
    pub custom_prompt: Option<String>,
}

/// Generates or revises a document. Backend failures arrive classified via
/// `From<GeminiError>`; parsing never fails.
pub async fn generate_text_content(
    client: &GeminiClient,
    request: &TextGenerationRequest,
) -> Result<GeneratedText, AppError> {
    let template = request
        .custom_prompt
        .as_deref()
        .unwrap_or_else(|| request.doc_type.template());

    let prompt = replace_prompt_variables(template, &request.inputs.variables());

    info!("generating text: doc_type={}", request.doc_type.label());
    let raw = client
        .generate_text(TEXT_MODEL, &prompt, &GeminiConfig::for_text())
        .await?;

    Ok(parse_generated_text(&raw))
}
