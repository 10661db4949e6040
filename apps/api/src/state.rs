use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. The reqwest client is the shared connection pool; the
/// Gemini credential is per-request and never lives here.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration, kept for handlers that grow a need for it.
    #[allow(dead_code)]
    pub config: Config,
    pub http: reqwest::Client,
}
