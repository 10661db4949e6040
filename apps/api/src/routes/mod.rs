pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Text-only generation / revision
        .route("/api/text-generate", post(handlers::handle_text_generate))
        // Two-call image generation for an existing title/content pair
        .route("/api/image-generate", post(handlers::handle_image_generate))
        // Combined text + image pipeline
        .route(
            "/api/generate",
            post(handlers::handle_generate).get(handlers::describe_generate),
        )
        // Default style catalogs
        .route("/api/styles", get(handlers::handle_styles))
        .with_state(state)
}
