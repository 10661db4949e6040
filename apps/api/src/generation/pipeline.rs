//! Combined pipeline: text generation, then image generation conditioned
//! on the generated title/content.
//!
//! Strictly sequential — the image prompt needs the text result, so no
//! parallelism is attempted. A failure at either stage aborts the whole
//! pipeline; partial results are never returned.

use tracing::info;

use crate::errors::AppError;
use crate::gemini::{GeminiClient, ImageArtifact};
use crate::generation::image::{generate_illustration, ImageGenerationRequest};
use crate::generation::parser::GeneratedText;
use crate::generation::prompts::{DocType, PromptInputs};
use crate::generation::text::{generate_text_content, TextGenerationRequest};

/// A validated combined request. Only generation types reach this point.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub doc_type: DocType,
    pub keywords: String,
    pub writing_style: String,
    pub image_style: String,
    pub custom_prompt: Option<String>,
}

/// The combined artifact: generated text plus its illustration.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub text: GeneratedText,
    pub image: ImageArtifact,
}

/// Runs the full text → image pipeline.
pub async fn generate_document(
    client: &GeminiClient,
    request: DocumentRequest,
) -> Result<DocumentArtifact, AppError> {
    let text = generate_text_content(
        client,
        &TextGenerationRequest {
            doc_type: request.doc_type,
            inputs: PromptInputs::Generation {
                keywords: request.keywords.clone(),
                writing_style: request.writing_style,
            },
            custom_prompt: request.custom_prompt.clone(),
        },
    )
    .await?;

    info!("text stage complete: title={}", text.title);

    let image = generate_illustration(
        client,
        &ImageGenerationRequest {
            title: text.title.clone(),
            content: text.content.clone(),
            keywords: request.keywords,
            image_style: request.image_style,
            custom_prompt: request.custom_prompt,
        },
    )
    .await?;

    Ok(DocumentArtifact { text, image })
}
