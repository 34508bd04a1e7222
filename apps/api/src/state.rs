use crate::config::Config;
use crate::llm_client::InferenceClient;
use crate::routes::frontend::Frontend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: InferenceClient,
    /// Read-only after startup.
    pub config: Config,
    pub frontend: Frontend,
}
