//! Image generation orchestrator — the two-call sequence.
//!
//! Call 1 turns the generated title/content into a single English
//! positive-prompt scene description via the fast text model. Call 2 feeds
//! that description, the requested image style, and the universal negative
//! prompt to the image model and extracts the inline payload.

use tracing::info;

use crate::errors::AppError;
use crate::gemini::{
    GeminiClient, GeminiConfig, ImageArtifact, Modality, IMAGE_MODEL, TEXT_MODEL,
};
use crate::generation::prompts::{
    replace_prompt_variables, IMAGE_PROMPT_TEMPLATE, NEGATIVE_PROMPT,
};

/// A validated image-generation request. `title`/`content` usually come
/// from a prior text generation; the standalone endpoint accepts them
/// directly from the caller.
#[derive(Debug, Clone)]
pub struct ImageGenerationRequest {
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub image_style: String,
    pub custom_prompt: Option<String>,
}

/// Runs both calls and returns the extracted image. An empty Call-1 result
/// is forwarded to Call 2 as-is — only Call 2 decides whether the request
/// fails.
pub async fn generate_illustration(
    client: &GeminiClient,
    request: &ImageGenerationRequest,
) -> Result<ImageArtifact, AppError> {
    let positive_prompt = synthesize_positive_prompt(client, request).await?;

    let final_prompt = format!(
        "{positive_prompt}\n\n{}\n\nNegative Keywords: {NEGATIVE_PROMPT}",
        request.image_style
    );

    let mut config = GeminiConfig::for_image();
    config.response_modalities = Some(vec![Modality::Image, Modality::Text]);

    info!("generating image: style={}", request.image_style);
    let image = client
        .generate_image(IMAGE_MODEL, &final_prompt, &config)
        .await?;

    Ok(image)
}

/// Call 1: builds the prompt-builder prompt and asks the fast text model
/// for an English scene description.
async fn synthesize_positive_prompt(
    client: &GeminiClient,
    request: &ImageGenerationRequest,
) -> Result<String, AppError> {
    let template = request
        .custom_prompt
        .as_deref()
        .unwrap_or(IMAGE_PROMPT_TEMPLATE);

    let builder_prompt = replace_prompt_variables(
        template,
        &[
            ("title", request.title.as_str()),
            ("content", request.content.as_str()),
            ("keywords", request.keywords.as_str()),
            ("imageStyle", request.image_style.as_str()),
        ],
    );

    let positive_prompt = client
        .generate_text(TEXT_MODEL, &builder_prompt, &GeminiConfig::for_text())
        .await?;
    Ok(positive_prompt)
}
