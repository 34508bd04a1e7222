pub mod frontend;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/healthz", get(health::health_handler))
        .route("/ready", get(health::health_handler))
        .route("/ping", get(health::health_handler))
        .route("/metrics", get(health::metrics_handler))
        .route("/debug", get(health::debug_handler))
        .route(
            "/api/generate-excuse",
            post(handlers::handle_generate_excuse),
        )
        .route("/", get(frontend::index_handler))
        .route("/docs", get(frontend::docs_handler));

    if let Some(public_dir) = state.frontend.public_dir() {
        router = router.nest_service("/static", ServeDir::new(public_dir));
    }

    router.with_state(state)
}
